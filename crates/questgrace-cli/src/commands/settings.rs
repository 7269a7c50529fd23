use std::path::PathBuf;

use clap::Subcommand;
use questgrace_core::settings::{
    KEY_AREA_TIMEOUT, KEY_AREA_TIMEOUT_HOT, KEY_POI_OUT_ZONE_MULTIPLIER, KEY_POI_TIMEOUT,
    KEY_POI_TIMEOUT_HOT,
};
use questgrace_core::Settings;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings after file overrides
    Show {
        /// Settings file (key=value lines); defaults apply when omitted
        #[arg(long)]
        path: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::Show { path, json } => {
            let settings = match path {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                println!("{KEY_POI_TIMEOUT}={}", settings.poi_timeout);
                println!("{KEY_POI_TIMEOUT_HOT}={}", settings.poi_timeout_hot);
                println!("{KEY_AREA_TIMEOUT}={}", settings.area_timeout);
                println!("{KEY_AREA_TIMEOUT_HOT}={}", settings.area_timeout_hot);
                println!(
                    "{KEY_POI_OUT_ZONE_MULTIPLIER}={}",
                    settings.poi_out_zone_multiplier
                );
            }
        }
    }
    Ok(())
}
