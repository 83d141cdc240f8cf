use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::{DEFAULT_DATA_FILE, DEFAULT_SHEET};

/// Microsoft Forms page where new indications are submitted.
pub const DEFAULT_FORM_URL: &str = "https://forms.office.com/Pages/DesignPageV2.aspx?subpage=design&token=e46031f2904444a89e08626ca679ff02&id=DmBElwQ-Lkm6oSXsJFxvENB7dqkvt85AnOAGY2k4IE9UMEFBRktYME0zSjJTQVlLTDhDQUc3QTVUMC4u&topview=Preview";

#[derive(Parser, Debug)]
#[command(author, version, about = "Dashboard for submitted indications")]
pub struct Args {
    /// Spreadsheet (.xlsx/.xls/.ods), CSV, JSON or Parquet file with the submissions
    #[arg(default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Worksheet to read from workbook files
    #[arg(short, long, default_value = DEFAULT_SHEET)]
    pub sheet: String,

    /// Link shown on the form page
    #[arg(long, default_value = DEFAULT_FORM_URL)]
    pub form_url: String,
}

/// Runtime settings shared by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: PathBuf,
    pub sheet: String,
    pub form_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data: PathBuf::from(DEFAULT_DATA_FILE),
            sheet: DEFAULT_SHEET.to_string(),
            form_url: DEFAULT_FORM_URL.to_string(),
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            data: args.data,
            sheet: args.sheet,
            form_url: args.form_url,
        }
    }
}
