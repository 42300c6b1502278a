use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;
use vsim::Simulator;
use vsim::domain::methods::MethodCall;
use vsim::domain::reflect::FieldKind;

pub(crate) fn inventory(sim: &Simulator, kind: Option<&str>, out: &mut impl Write) -> Result<()> {
    for reference in sim.registry().references(kind) {
        writeln!(out, "{reference}")?;
    }
    Ok(())
}

pub(crate) fn schema(sim: &Simulator, out: &mut impl Write) -> Result<()> {
    let schema = sim.schema();
    for name in schema.types() {
        let Some(descriptor) = schema.descriptor(name) else { continue };

        let bases = schema.bases(name);
        if bases.is_empty() {
            writeln!(out, "{name}")?;
        } else {
            writeln!(out, "{name} : {}", bases.join(" : "))?;
        }

        for field in descriptor.fields {
            let kind = match field.kind {
                FieldKind::Value => "value".to_owned(),
                FieldKind::Sequence => "sequence".to_owned(),
                FieldKind::Record(record) => format!("record {record}"),
                FieldKind::Embedded(base) => format!("embeds {}", base.name),
            };
            writeln!(out, "  {} ({kind})", field.api_name())?;
        }
    }
    Ok(())
}

pub(crate) fn call(sim: &Simulator, input: &Path, pretty: bool, out: &mut impl Write) -> Result<()> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("Failed to read the request from stdin")?;
        text
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))?
    };

    let call: MethodCall = serde_json::from_str(&text).context("Malformed method call")?;
    debug!(method = call.name(), this = %call.this(), "dispatching");
    let body = sim.dispatch(&call);

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &body)?;
    } else {
        serde_json::to_writer(&mut *out, &body)?;
    }
    writeln!(out)?;
    Ok(())
}
