use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tagwire::{DecodeOptions, MismatchPolicy, core::format_message};
use tracing::debug;

use crate::input::{load_schemas, read_payload};

#[derive(Args)]
pub struct DecodeArgs {
    /// Payload file (`-` for stdin)
    input: PathBuf,

    /// Schema files (.tws)
    #[arg(short, long = "schema", required = true)]
    schemas: Vec<PathBuf>,

    /// Entry type to decode
    #[arg(short = 't', long = "type")]
    type_name: String,

    /// Skip values whose wire type does not match instead of failing
    #[arg(long)]
    resilient: bool,

    /// Maximum nesting depth
    #[arg(long, default_value_t = DecodeOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl DecodeArgs {
    pub fn run(self) -> Result<()> {
        let mut options = DecodeOptions::new().with_max_depth(self.max_depth);
        if self.resilient {
            options = options.with_mismatch_policy(MismatchPolicy::Resilient);
        }
        let (codec, _) = load_schemas(&self.schemas, options)?;
        let payload = read_payload(&self.input)?;
        debug!(type_name = %self.type_name, bytes = payload.len(), "decoding payload");
        let message = codec
            .decode(&self.type_name, &payload)
            .with_context(|| {
                format!(
                    "failed to decode '{}' as {}",
                    self.input.display(),
                    self.type_name
                )
            })?;
        print!("{}", format_message(&message)?);
        Ok(())
    }
}
