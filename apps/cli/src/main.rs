//! # RackRate CLI
//!
//! Operator shell for the rate-stacking engine.
//!
//! ## Usage
//! ```bash
//! # Write a sample settings file to start from
//! rackrate init --out asset.json
//!
//! # What does the guest pay for a PMS rate of 100 on a given stay date?
//! rackrate quote --settings asset.json --rate 100 --date 2025-11-28
//!
//! # Which PMS rate realizes a target sell rate?
//! rackrate target --settings asset.json --sell 99.45
//! ```
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shell vs. Core                                   │
//! │                                                                         │
//! │  THIS BINARY                          rackrate-core                     │
//! │  ─────────────────────────────        ─────────────────────────────     │
//! │  • Read the settings file             • Resolve campaign rules          │
//! │  • Default --date to today            • Forward / reverse math          │
//! │  • Advisory validation warnings       • Waterfall rows                  │
//! │  • Format rates (n/a for inf/NaN)     • (no I/O, no logging)            │
//! │  • Structured logging                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::env;
use std::fs;
use std::process::ExitCode;

use chrono::{Days, NaiveDate, Utc};
use rackrate_core::settings::{AssetSettings, CalculatorSettings, CampaignSettings, ModifierSettings};
use rackrate_core::validation::check_config;
use rackrate_core::{compute_required_pms_rate, compute_waterfall, RateStackConfig, WaterfallStep};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("quote") => cmd_quote(&args[1..]),
        Some("target") => cmd_target(&args[1..]),
        Some("init") => cmd_init(&args[1..]),
        Some("--help") | Some("-h") | None => {
            print_help();
            Ok(())
        }
        Some(other) => Err(format!("unknown command '{}', see --help", other)),
    }
}

fn print_help() {
    println!("RackRate - hotel rate waterfall calculator");
    println!();
    println!("Usage: rackrate <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  quote    Compute the sell rate and waterfall from a PMS rate");
    println!("  target   Compute the PMS rate required for a target sell rate");
    println!("  init     Write a sample settings file");
    println!();
    println!("Options:");
    println!("  -s, --settings <FILE>  Asset settings JSON (quote, target)");
    println!("  -r, --rate <PMS>       PMS base rate (quote)");
    println!("  -t, --sell <RATE>      Target sell rate (target)");
    println!("  -d, --date <DATE>      Stay date, YYYY-MM-DD (default: today)");
    println!("  -o, --out <FILE>       Output path (init, default: asset.json)");
    println!("  -h, --help             Show this help message");
}

// =============================================================================
// Commands
// =============================================================================

fn cmd_quote(args: &[String]) -> Result<(), String> {
    let opts = Options::parse(args)?;
    let pms_rate = opts
        .rate
        .ok_or_else(|| "quote requires --rate <PMS>".to_string())?;
    let config = load_config(&opts)?;

    info!(pms_rate, stay_date = %config.test_date, "computing quote");
    print_waterfall(&compute_waterfall(pms_rate, &config));
    Ok(())
}

fn cmd_target(args: &[String]) -> Result<(), String> {
    let opts = Options::parse(args)?;
    let sell_rate = opts
        .sell
        .ok_or_else(|| "target requires --sell <RATE>".to_string())?;
    let config = load_config(&opts)?;

    info!(sell_rate, stay_date = %config.test_date, "computing required PMS rate");
    let required = compute_required_pms_rate(sell_rate, &config);

    println!("Target sell rate:  {}", fmt_rate(sell_rate));
    println!("Required PMS rate: {}", fmt_rate(required));

    // Show the forward breakdown from the recovered rate so the operator
    // can verify the round trip at a glance.
    if required.is_finite() {
        println!();
        print_waterfall(&compute_waterfall(required, &config));
    } else {
        warn!("target is unreachable: a step in the stack discounts by 100% or the multiplier is zero");
    }
    Ok(())
}

fn cmd_init(args: &[String]) -> Result<(), String> {
    let opts = Options::parse(args)?;
    let path = opts.out.unwrap_or_else(|| "asset.json".to_string());

    let json = sample_settings()
        .to_json_pretty()
        .map_err(|e| e.to_string())?;
    fs::write(&path, json).map_err(|e| format!("cannot write {}: {}", path, e))?;

    println!("✓ Wrote sample settings to {}", path);
    println!("  Edit it, then: rackrate quote --settings {} --rate 100", path);
    Ok(())
}

// =============================================================================
// Option Parsing
// =============================================================================

#[derive(Default)]
struct Options {
    settings: Option<String>,
    rate: Option<f64>,
    sell: Option<f64>,
    date: Option<NaiveDate>,
    out: Option<String>,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Options::default();
        let mut i = 0;

        while i < args.len() {
            match args[i].as_str() {
                "--settings" | "-s" => {
                    opts.settings = Some(take_value(args, &mut i, "--settings")?);
                }
                "--rate" | "-r" => {
                    let raw = take_value(args, &mut i, "--rate")?;
                    opts.rate =
                        Some(raw.parse().map_err(|_| format!("invalid rate '{}'", raw))?);
                }
                "--sell" | "-t" => {
                    let raw = take_value(args, &mut i, "--sell")?;
                    opts.sell =
                        Some(raw.parse().map_err(|_| format!("invalid rate '{}'", raw))?);
                }
                "--date" | "-d" => {
                    let raw = take_value(args, &mut i, "--date")?;
                    let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))?;
                    opts.date = Some(parsed);
                }
                "--out" | "-o" => {
                    opts.out = Some(take_value(args, &mut i, "--out")?);
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => return Err(format!("unknown option '{}'", other)),
            }
            i += 1;
        }

        Ok(opts)
    }
}

fn take_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    if *i + 1 < args.len() {
        *i += 1;
        Ok(args[*i].clone())
    } else {
        Err(format!("{} requires a value", flag))
    }
}

// =============================================================================
// Settings & Config
// =============================================================================

/// Loads the settings file and builds the engine config for the stay date.
///
/// Advisory validation findings are logged as warnings; the computation
/// proceeds regardless (the engine is permissive by design and extreme
/// results are displayed as-is).
fn load_config(opts: &Options) -> Result<RateStackConfig, String> {
    let path = opts
        .settings
        .as_deref()
        .ok_or_else(|| "missing --settings <FILE>".to_string())?;
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    let settings = AssetSettings::from_json(&raw).map_err(|e| e.to_string())?;

    let stay_date = opts.date.unwrap_or_else(|| Utc::now().date_naive());
    let config = settings.to_config(stay_date);

    for finding in check_config(&config) {
        warn!(%finding, "settings check");
    }

    Ok(config)
}

/// A realistic starting settings file: markup, non-refundable and mobile
/// discounts on, one deep deal and one mobile-blocking campaign with
/// windows anchored around today.
fn sample_settings() -> AssetSettings {
    let today = Utc::now().date_naive();
    let in_days = |n: u64| today.checked_add_days(Days::new(n));

    AssetSettings {
        strategic_multiplier: 1.2,
        genius_discount_percent: 10.0,
        calculator_settings: CalculatorSettings {
            non_ref: ModifierSettings {
                active: true,
                percent: 10.0,
            },
            mobile: ModifierSettings {
                active: true,
                percent: 10.0,
            },
            country: ModifierSettings {
                active: false,
                percent: 0.0,
            },
            campaigns: vec![
                CampaignSettings {
                    id: Uuid::new_v4().to_string(),
                    slug: "black-friday".to_string(),
                    discount: 30.0,
                    start_date: in_days(30),
                    end_date: in_days(37),
                    active: true,
                },
                CampaignSettings {
                    id: Uuid::new_v4().to_string(),
                    slug: "early-deal".to_string(),
                    discount: 15.0,
                    start_date: Some(today),
                    end_date: in_days(14),
                    active: true,
                },
            ],
        },
    }
}

// =============================================================================
// Display
// =============================================================================

/// Formats a rate for display. Non-finite results (100% discounts, zero
/// multiplier) render as "n/a" rather than "inf".
fn fmt_rate(rate: f64) -> String {
    if rate.is_finite() {
        format!("{:.2}", rate)
    } else {
        "n/a".to_string()
    }
}

fn print_waterfall(steps: &[WaterfallStep]) {
    for step in steps {
        let pad = "  ".repeat(step.indent as usize);
        let marker = if step.is_final {
            "="
        } else if step.is_info {
            "·"
        } else {
            " "
        };
        println!("{} {}{:<58} {:>10}", marker, pad, step.label, fmt_rate(step.rate));
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rackrate=trace` - Show trace for rackrate crates only
/// - Default: WARN level, so waterfall output stays clean
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,rackrate=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================
