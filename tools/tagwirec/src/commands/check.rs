use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tagwire::DecodeOptions;

use crate::input::load_schemas;

#[derive(Args)]
pub struct CheckArgs {
    /// Schema files (.tws)
    #[arg(required = true)]
    schemas: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let (codec, declared) = load_schemas(&self.schemas, DecodeOptions::default())?;
        let registry = codec.registry();
        for name in &declared {
            if let Some(plan) = registry.plan_by_name(name) {
                println!("{name}: {} fields", plan.len());
            }
        }
        println!("ok: {} types compiled", declared.len());
        Ok(())
    }
}
