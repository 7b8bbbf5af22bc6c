//! Writes the TypeScript declarations of the API types for the frontend.
//!
//! Usage: `cargo run --bin generate-types [-- <output path>]`
//! (default `shared/types.ts`).

use std::{fs, path::PathBuf};

use db::models::{
    dream_symbol::DreamSymbol,
    interpretation::{InterpretationCategory, NumberInterpretation},
    oracle_message::OracleMessage,
};
use server::routes::{
    biorhythm::BiorhythmChart,
    health::HealthResponse,
    numerology::{CompatibilityResponse, DestinyResponse},
};
use services::services::{
    biorhythm::{BiorhythmReading, CriticalDay, Cycle, CycleReading, Trend},
    compatibility::{Compatibility, CompatibilityLevel},
    daily_content::{DailyDream, DailyEnergy, DailyOracle, PersonalCycles, PersonalDayReport},
    interpretations::{DailyNumberReport, LifePathReport, NameReport},
    moon_phase::{MoonInfo, MoonPhase},
    numerology::{LifePath, NameNumbers},
};
use ts_rs::TS;
use utils::response::ApiResponse;

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("shared/types.ts"));

    let decls = [
        ApiResponse::<()>::decl(),
        HealthResponse::decl(),
        InterpretationCategory::decl(),
        NumberInterpretation::decl(),
        DreamSymbol::decl(),
        OracleMessage::decl(),
        LifePath::decl(),
        NameNumbers::decl(),
        LifePathReport::decl(),
        NameReport::decl(),
        DestinyResponse::decl(),
        DailyNumberReport::decl(),
        CompatibilityLevel::decl(),
        Compatibility::decl(),
        CompatibilityResponse::decl(),
        Cycle::decl(),
        Trend::decl(),
        CycleReading::decl(),
        BiorhythmReading::decl(),
        BiorhythmChart::decl(),
        CriticalDay::decl(),
        MoonPhase::decl(),
        MoonInfo::decl(),
        PersonalCycles::decl(),
        PersonalDayReport::decl(),
        DailyDream::decl(),
        DailyEnergy::decl(),
        DailyOracle::decl(),
    ];

    let body = decls
        .iter()
        .map(|decl| format!("export {decl}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    let contents = format!(
        "// This file was generated by `cargo run --bin generate-types`. Do not edit manually.\n\n{body}\n"
    );

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, contents)?;
    println!("Wrote {} declarations to {}", decls.len(), output.display());
    Ok(())
}
