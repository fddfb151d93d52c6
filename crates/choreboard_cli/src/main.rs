//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `choreboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use choreboard_core::{
    default_log_level, init_logging, parse_rule, weekdays_of, weekly_rule, Weekday,
};

fn main() {
    let log_dir = std::env::temp_dir().join("choreboard-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), dir) {
            eprintln!("choreboard_cli logging_init_failed: {err}");
        }
    }

    let rule = weekly_rule(Weekday::Monday);
    println!("choreboard_core version={}", choreboard_core::core_version());
    println!("choreboard_core sample_rule={rule}");
    println!(
        "choreboard_core parsed={:?}",
        parse_rule("FREQ=WEEKLY;BYDAY=MO,WE,FR")
    );
    println!(
        "choreboard_core weekday_count={}",
        weekdays_of("FREQ=WEEKLY;BYDAY=MO,WE,FR").len()
    );
}
