use clap::Parser;
use std::fs;
use std::io::{self, Read};

use crate::balance::calculator::BalanceReport;
use crate::error::AppError;
use crate::models::{Settings, WaterReading};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pool water balance advisor - optional JSON output", long_about = None)]
pub struct Args {
    #[arg(long)]
    json: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with a reading and optional settings; '-' reads from stdin"
    )]
    input: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for the water reading (overrides --input)"
    )]
    inputs_json: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        help = "Inline JSON for settings (optional, supplements --inputs-json)"
    )]
    settings_json: Option<String>,
}

fn parse_inline_inputs(
    inputs_json: &str,
    settings_json: Option<&String>,
) -> Result<(WaterReading, Settings), AppError> {
    let reading: WaterReading =
        serde_json::from_str(inputs_json).map_err(|source| AppError::ParseInputsJson { source })?;

    let settings = match settings_json {
        Some(s) => serde_json::from_str::<Settings>(s)
            .map_err(|source| AppError::ParseSettingsJson { source })?,
        None => Settings::default(),
    };

    Ok((reading, settings))
}

fn parse_cmd_input_doc(doc: &str) -> Result<(WaterReading, Settings), AppError> {
    let parsed: CmdInput =
        serde_json::from_str(doc).map_err(|source| AppError::ParseCmdInputJson { source })?;
    Ok((parsed.reading, parsed.settings.unwrap_or_default()))
}

pub fn parse_inputs(args: &Args) -> Result<(WaterReading, Settings), AppError> {
    match (&args.inputs_json, &args.input) {
        (Some(inputs_json), _) => parse_inline_inputs(inputs_json, args.settings_json.as_ref()),
        (None, Some(path)) if path == "-" => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|source| AppError::ReadStdin { source })?;
            parse_cmd_input_doc(&s)
        }
        (None, Some(path)) => {
            let s = fs::read_to_string(path).map_err(|source| AppError::ReadFile {
                path: path.clone(),
                source,
            })?;
            parse_cmd_input_doc(&s)
        }
        (None, None) => Err(AppError::MissingInputData),
    }
}

#[derive(serde::Deserialize)]
struct CmdInput {
    reading: WaterReading,
    #[serde(default)]
    settings: Option<Settings>,
}

pub fn print_output(report: &BalanceReport, args: &Args) -> Result<(), AppError> {
    if args.json {
        let s = serde_json::to_string_pretty(&report)
            .map_err(|source| AppError::SerializeOutput { source })?;
        println!("{}", s);
        return Ok(());
    }

    println!(
        "{} ({}): LSI {:.2} - {}",
        report.jurisdiction, report.pool_type, report.lsi, report.lsi_status
    );

    println!("\nCompliance:");
    for row in &report.compliance {
        println!(
            "  {} {}: {} (range {} - {})",
            if row.compliant { "ok " } else { "BAD" },
            row.parameter,
            row.current,
            row.min.map_or("-".to_string(), |v| v.to_string()),
            row.max.map_or("-".to_string(), |v| v.to_string()),
        );
    }
    for w in &report.warnings {
        println!("  warning: {w}");
    }

    println!("\nDosing plan:");
    for step in &report.plan.steps {
        match &step.dose {
            Some(dose) => println!(
                "  {} {} -> {}: {dose}{}",
                step.parameter,
                step.current,
                step.target,
                match step.schedule {
                    Some(s) => format!(" ({s:?})"),
                    None => String::new(),
                }
            ),
            None => println!(
                "  {} {} -> {}: no dose needed",
                step.parameter, step.current, step.target
            ),
        }
        if let Some(f) = &step.followup {
            println!(
                "    then {} to move pH from {} to {}",
                f.dose, f.from_ph, f.to_ph
            );
        }
    }
    for note in &report.plan.notes {
        println!("  note: {note}");
    }

    println!(
        "\nShock: {} (combined chlorine {:.2} ppm)",
        report.shock.urgency, report.shock.combined_chlorine
    );
    if let Some(lbs) = report.shock.dose_lbs {
        println!("  dose {lbs:.2} lbs to reach breakpoint");
    }

    let wc = &report.weekly_chlorine;
    println!(
        "\nWeekly chlorine: dose {:.2} ppm (min FC {:.2}, UV loss {:.2})",
        wc.to_be_dosed, wc.min_fc, wc.uv_loss
    );
    match wc.amount {
        Some(crate::dosing::ChlorineAmount::Liquid { gallons, fl_oz }) => {
            println!("  {gallons:.2} gal ({fl_oz:.0} fl oz) liquid chlorine");
        }
        Some(crate::dosing::ChlorineAmount::Granular { ounces }) => {
            println!("  {ounces:.1} oz granular chlorine");
        }
        None => println!("  no chlorine addition needed"),
    }

    if let Some(salt) = &report.salt {
        println!(
            "\nSalt: {:.2} lbs ({} x 40 lb bags)",
            salt.lbs, salt.bags
        );
    }

    Ok(())
}
