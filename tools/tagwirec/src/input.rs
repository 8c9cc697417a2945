use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tagwire::{Codec, DecodeOptions, SchemaLoader};

/// Read a payload from a file, or from stdin when the path is `-`.
pub fn read_payload(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read payload from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("failed to read payload '{}'", path.display()))
}

/// Parse every schema file and compile them into one codec.
pub fn load_schemas(paths: &[PathBuf], options: DecodeOptions) -> Result<(Codec, Vec<String>)> {
    let mut loader = SchemaLoader::new().with_options(options);
    for path in paths {
        loader.add_file(path)?;
    }
    let declared = loader
        .descriptors()
        .iter()
        .map(|desc| desc.name.clone())
        .collect();
    Ok((loader.build()?, declared))
}
