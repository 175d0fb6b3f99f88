//! Advise command - advisory text about carriers and messages.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use cloakline::advisory::{assess_carrier_or_fallback, suggest_message_or_fallback, OfflineAdvisor};
use cloakline::Config;

use super::{read_carrier, CapacityCommand, CarrierKind, CommandExecutor};

/// Summarize a carrier and ask the advisor to assess it, or suggest a
/// sample message.
///
/// No advisory service is bundled, so the fixed fallback texts are printed.
#[derive(Args, Debug)]
pub struct AdviseCommand {
    /// Carrier file to assess (suggests a sample message if omitted)
    #[arg(short, long)]
    pub carrier: Option<PathBuf>,
}

impl CommandExecutor for AdviseCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let advisor = OfflineAdvisor;

        match &self.carrier {
            Some(path) => {
                CapacityCommand {
                    carrier: path.clone(),
                    kind: CarrierKind::Auto,
                }
                .execute(config)?;

                let bytes = read_carrier(path)?;
                println!();
                println!("{}", assess_carrier_or_fallback(&advisor, &bytes));
            }
            None => println!("{}", suggest_message_or_fallback(&advisor)),
        }
        Ok(())
    }
}
