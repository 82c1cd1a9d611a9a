use clap::Parser;
use shared::error::{ApiResponse, ErrorCode};
use std::io::Write;
use stitch_client::{InMemoryStore, OrderStore};
use stitch_desk::app::{run, run_with_store};
use stitch_desk::cli::Cli;
use stitch_desk::pricing::GstLine;
use stitch_desk::receipts::MatchedBy;
use stitch_desk::{Config, OrderDetail, PaymentState, load_snapshot, render_text};

const FIXTURE: &str = include_str!("fixtures/order_tv0042.json");

fn store() -> InMemoryStore {
    InMemoryStore::from_json(FIXTURE).unwrap()
}

#[tokio::test]
async fn test_order_detail_from_store() {
    let store = store();
    let snapshot = load_snapshot(&store, "TV-0042").await.unwrap();
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.receipts.len(), 3);

    let detail = OrderDetail::build(&snapshot, &[]);

    // Orphan XL override is dropped on load, L has no pieces
    let polo = detail.line("it-1").unwrap();
    let sizes: Vec<(&str, i64, f64)> = polo
        .sizes
        .iter()
        .map(|s| (s.size.as_str(), s.quantity, s.amount))
        .collect();
    assert_eq!(sizes, vec![("S", 10, 1200.0), ("M", 5, 500.0), ("L", 0, 0.0)]);
    assert_eq!(polo.amount, 1700.0);
    assert_eq!(polo.tax, 306.0);
    assert_eq!(polo.images.len(), 1);

    let tote = detail.line("it-2").unwrap();
    assert!(tote.sizes.is_empty());
    assert_eq!(tote.pieces, 10);
    assert_eq!(tote.amount, 500.0);
    assert_eq!(tote.gst_rate, 5.0);

    assert_eq!(detail.summary.subtotal, 2200.0);
    assert_eq!(detail.summary.tax_amount, 331.0);
    assert_eq!(detail.summary.grand_total, 2531.0);
    assert_eq!(
        detail.gst,
        vec![
            GstLine { rate: 5.0, amount: 25.0 },
            GstLine { rate: 18.0, amount: 306.0 },
        ]
    );

    let drifting: Vec<&str> = detail.drift.iter().map(|d| d.field.as_str()).collect();
    assert_eq!(drifting, vec!["tax_amount", "final_amount"]);

    // Quotation receipt is not counted; newest matched receipt first
    let payments = &detail.payments;
    let matched: Vec<(&str, MatchedBy)> = payments
        .matched
        .iter()
        .map(|m| (m.receipt.id.as_str(), m.matched_by))
        .collect();
    assert_eq!(
        matched,
        vec![("r-2", MatchedBy::OrderNumber), ("r-1", MatchedBy::OrderId)]
    );
    assert_eq!(payments.total_paid, 1500.0);
    assert_eq!(payments.pending_amount, 1071.0);
    assert_eq!(payments.state, PaymentState::Pending);

    let titles: Vec<(&str, &str, &str)> = detail
        .timeline
        .iter()
        .map(|e| (e.title.as_str(), e.subtitle.as_str(), e.performer.as_str()))
        .collect();
    assert_eq!(
        titles,
        vec![
            (
                "Status Updated",
                "Cutting complete, stitching started",
                "floor@tailorvogue.in"
            ),
            ("Order Created", "Order TV-0042 created", "Meera"),
        ]
    );

    let text = render_text(&detail);
    assert!(text.starts_with("Order TV-0042 (Under Stitching)"));
    assert!(text.contains("Ordered 2024-04-01, delivery 2024-04-20"));
    assert!(text.contains("GST (5%)"));
    assert!(text.contains("RCP-117"));
    assert!(text.contains("(by order number)"));
}

#[tokio::test]
async fn test_backfill_run_links_legacy_receipts() {
    let store = store();
    let cli = Cli::try_parse_from([
        "stitch-desk",
        "TV-0042",
        "--backfill-receipts",
        "--charge",
        "Courier=40",
    ])
    .unwrap();

    let output = run_with_store(&store, &cli).await.unwrap();
    assert_eq!(output.backfilled, 1);
    assert!(
        output
            .detail
            .payments
            .matched
            .iter()
            .all(|m| m.matched_by == MatchedBy::OrderId)
    );
    assert_eq!(output.detail.payments.total_paid, 1500.0);
    assert_eq!(output.detail.summary.grand_total, 2571.0);
    assert!(output.detail.drift.iter().all(|d| d.field == "tax_amount"));

    // Second run finds nothing left to link
    let again = run_with_store(&store, &cli).await.unwrap();
    assert_eq!(again.backfilled, 0);

    let order = store.order_by_number("TV-0042").await.unwrap();
    let receipts = store.receipts_for(&order).await.unwrap();
    let quotation = receipts.iter().find(|r| r.id == "r-3").unwrap();
    assert_eq!(quotation.reference_id, None);
}

#[tokio::test]
async fn test_run_from_snapshot_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["stitch-desk", "TV-0042", "--snapshot", &path, "--json"]).unwrap();
    let output = run(&cli, &Config::default()).await.unwrap();

    let json = serde_json::to_value(ApiResponse::success(&output)).unwrap();
    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["backfilled"], 0);
    assert_eq!(json["data"]["detail"]["summary"]["grand_total"], 2531.0);
    assert_eq!(json["data"]["detail"]["payments"]["state"], "pending");
    assert_eq!(json["data"]["detail"]["order"]["status"], "under_stitching");
}

#[tokio::test]
async fn test_run_reports_missing_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::try_parse_from(["stitch-desk", "TV-9999", "--snapshot", &path]).unwrap();
    let err = run(&cli, &Config::default()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);

    let response: ApiResponse<()> = ApiResponse::error(&err);
    assert_eq!(response.code, 4001);
    assert_eq!(response.details.unwrap()["order_number"], "TV-9999");

    let cli = Cli::try_parse_from(["stitch-desk", "TV-0042", "--snapshot", "/nonexistent/rows.json"])
        .unwrap();
    assert!(run(&cli, &Config::default()).await.is_err());
}
