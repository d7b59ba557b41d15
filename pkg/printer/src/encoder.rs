use serde_json::Value;
use std::io::Write;

/// Serializes (partial) objects to a writer.
pub trait Encoder: Send + Sync {
    fn encode(&self, value: &Value, out: &mut dyn Write) -> anyhow::Result<()>;
}

/// One YAML document per object, keys in alphabetical order.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl Encoder for YamlEncoder {
    fn encode(&self, value: &Value, out: &mut dyn Write) -> anyhow::Result<()> {
        if value.is_null() {
            return Ok(());
        }
        serde_yaml::to_writer(out, value)?;
        Ok(())
    }
}

/// Indented JSON, terminated by a newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value, out: &mut dyn Write) -> anyhow::Result<()> {
        if value.is_null() {
            return Ok(());
        }
        serde_json::to_writer_pretty(&mut *out, value)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Look up an encoder by output format name.
pub fn encoder_for(format: &str) -> anyhow::Result<Box<dyn Encoder>> {
    match format {
        "yaml" => Ok(Box::new(YamlEncoder)),
        "json" => Ok(Box::new(JsonEncoder)),
        other => anyhow::bail!("unable to match a printer suitable for the output format {:?}, allowed formats are: json,yaml", other),
    }
}
