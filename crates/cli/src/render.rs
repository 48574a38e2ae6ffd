//! Plain-text rendering for engine views.
use engine::{FillReport, Receipt, ResourceKind, StatusReport};

pub fn status(report: &StatusReport) -> String {
    let mut lines = vec!["=== MACHINE STATUS ===".to_string()];
    for (kind, gauge) in report.gauges() {
        lines.push(format!(
            "{:<6} {:>5} / {} {}",
            kind.label(),
            gauge.level,
            gauge.capacity,
            kind.unit()
        ));
    }
    lines.push(format!("till: {}", report.till));
    lines.push(format!("wallet: {}", report.wallet));
    lines.push("--- sales ---".to_string());
    lines.push(format!("espresso: {}", report.sold.espresso));
    lines.push(format!("latte: {}", report.sold.latte));
    lines.push(format!("cappuccino: {}", report.sold.cappuccino));
    lines.push(format!("historical revenue: {}", report.revenue));
    lines.push(format!(
        "withdrawn: {}   donated: {}",
        report.withdrawn_total, report.donated
    ));
    lines.join("\n")
}

pub fn receipt(receipt: &Receipt) -> String {
    [
        "=== RECEIPT ===".to_string(),
        format!("drink:  {}", receipt.drink),
        format!("price:  {}", receipt.price),
        format!("paid:   {}", receipt.paid),
        format!("change: {}", receipt.change),
        format!("issued: {}", receipt.issued_at.format("%Y-%m-%d %H:%M:%S UTC")),
        "Thank you for your purchase!".to_string(),
    ]
    .join("\n")
}

pub fn fill_report(report: &FillReport) -> String {
    let parts: Vec<String> = ResourceKind::ALL
        .into_iter()
        .map(|kind| format!("{} +{} {}", kind.label(), report.get(kind), kind.unit()))
        .collect();
    format!("loaded (capacity respected): {}", parts.join(", "))
}
