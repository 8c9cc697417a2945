use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use tagwire::DecodeOptions;

use crate::input::load_schemas;

#[derive(Args)]
pub struct PlanArgs {
    /// Schema files (.tws)
    #[arg(required = true)]
    schemas: Vec<PathBuf>,

    /// Print only this type (built-in types included)
    #[arg(short = 't', long = "type")]
    type_name: Option<String>,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let (codec, declared) = load_schemas(&self.schemas, DecodeOptions::default())?;
        let registry = codec.registry();
        let names = match self.type_name {
            Some(name) => vec![name],
            None => declared,
        };
        for name in names {
            let Some(id) = registry.id(&name) else {
                bail!("unknown type '{name}'");
            };
            print!("{}", registry.display_plan(id));
        }
        Ok(())
    }
}
