//! Theme coverage example
//!
//! Enumerates every answer combination of each built-in theme and prints
//! how the results are distributed.

use shindan_sdk::QuizEngineBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = QuizEngineBuilder::new().build()?;

    for report in engine.coverage_all() {
        println!("=== {} ({} combinations) ===", report.theme_id, report.combinations);

        for (type_id, hits) in &report.type_hits {
            let share = *hits as f64 * 100.0 / report.combinations as f64;
            println!("  {:<16} {:>3}  {:>5.1}%", type_id, hits, share);
        }
        for (index, hits) in &report.rule_hits {
            println!("  rule {:<11} {:>3}", index, hits);
        }
        println!("  fallback         {:>3}", report.fallback_hits);

        if !report.unreachable_types.is_empty() {
            println!("  unreachable: {}", report.unreachable_types.join(", "));
        }
        println!();
    }

    // Machine-readable form of the last report
    if let Some(report) = engine.coverage_all().last() {
        println!("{}", serde_json::to_string_pretty(report)?);
    }

    Ok(())
}
