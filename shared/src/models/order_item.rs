//! Order Item Model

use crate::util::{
    decode_json_string, lenient_f64, lenient_i64, lenient_opt_f64, lenient_opt_string,
    lenient_prices, lenient_quantities, lenient_string, lenient_vec, value_to_i64,
};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Size label → quantity, in the order the sizes were entered
pub type SizeQuantities = IndexMap<String, i64>;

/// Size label → unit price override
pub type SizePrices = IndexMap<String, f64>;

/// Current version of the [`LineItemExtras`] layout
pub const EXTRAS_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    EXTRAS_SCHEMA_VERSION
}

fn lenient_schema_version<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(|v| u32::try_from(value_to_i64(v)).ok())
        .filter(|v| *v > 0)
        .unwrap_or(EXTRAS_SCHEMA_VERSION))
}

/// Attachment or image reference: the store holds either a bare URL or `{url, name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AssetRefRepr")]
pub struct AssetRef {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssetRefRepr {
    Url(String),
    Full {
        url: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<AssetRefRepr> for AssetRef {
    fn from(repr: AssetRefRepr) -> Self {
        match repr {
            AssetRefRepr::Url(url) => AssetRef { url, name: None },
            AssetRefRepr::Full { url, name } => AssetRef { url, name },
        }
    }
}

/// Garment customization (embroidery, print, piping, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "value", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Branding placement (logo, label, tag)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingItem {
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub branding_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed view of the line item `specifications` column
///
/// Keys this version doesn't know are kept in `extra` and written back
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemExtras {
    #[serde(
        default = "default_schema_version",
        deserialize_with = "lenient_schema_version"
    )]
    pub schema_version: u32,
    #[serde(
        default,
        deserialize_with = "lenient_prices",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub size_prices: SizePrices,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_type_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub customizations: Vec<Customization>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub branding_items: Vec<BrandingItem>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reference_images: Vec<AssetRef>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub mockup_images: Vec<AssetRef>,
    #[serde(
        default,
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<AssetRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LineItemExtras {
    fn default() -> Self {
        Self {
            schema_version: EXTRAS_SCHEMA_VERSION,
            size_prices: SizePrices::new(),
            size_type_id: None,
            customizations: Vec::new(),
            branding_items: Vec::new(),
            reference_images: Vec::new(),
            mockup_images: Vec::new(),
            attachments: Vec::new(),
            extra: Map::new(),
        }
    }
}

fn lenient_extras<'de, D: Deserializer<'de>>(d: D) -> Result<LineItemExtras, D::Error> {
    match Option::<Value>::deserialize(d)?.map(decode_json_string) {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable line item specifications, using defaults");
            LineItemExtras::default()
        })),
        _ => Ok(LineItemExtras::default()),
    }
}

/// Order line item row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub order_id: String,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fabric_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub gsm: Option<String>,
    /// Flat quantity, used when the line has no size breakdown
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    /// Base unit price
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    /// Persisted line total
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_price: f64,
    /// Per-line GST rate; falls back to the order rate when absent
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub gst_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_quantities")]
    pub sizes_quantities: SizeQuantities,
    #[serde(default, deserialize_with = "lenient_extras")]
    pub specifications: LineItemExtras,
}

impl OrderItem {
    /// Price overrides, if the line carries any
    pub fn size_prices(&self) -> Option<&SizePrices> {
        let prices = &self.specifications.size_prices;
        (!prices.is_empty()).then_some(prices)
    }

    pub fn size_type_id(&self) -> Option<&str> {
        self.specifications.size_type_id.as_deref()
    }

    /// Drop price overrides for sizes the line has no quantity for.
    ///
    /// Returns the number of overrides removed.
    pub fn normalize(&mut self) -> usize {
        let quantities = &self.sizes_quantities;
        let before = self.specifications.size_prices.len();
        self.specifications
            .size_prices
            .retain(|size, _| quantities.contains_key(size));
        let dropped = before - self.specifications.size_prices.len();
        if dropped > 0 {
            tracing::warn!(
                item_id = %self.id,
                order_id = %self.order_id,
                dropped,
                "Dropped size price overrides without a matching quantity"
            );
        }
        dropped
    }
}
