use std::io::Write;

use anyhow::Context;
use tuid::{
    NanoClock, SystemClock, ThreadRandom, Tuid, TuidGenerator,
    i62::{decode_big, encode_big},
};

use crate::config::Action;

/// Executes `action`, writing its output to `out`.
pub fn run<W: Write>(action: Action, out: &mut W) -> anyhow::Result<()> {
    match action {
        Action::Generate { kind, count, clock } => {
            let clock = NanoClock::with_config(SystemClock, clock);
            let generator = TuidGenerator::new(clock, ThreadRandom);
            tracing::debug!(?generator, kind, count, "generating");
            for _ in 0..count {
                writeln!(out, "{}", generator.next(kind))?;
            }
            tracing::debug!(
                calibrations = generator.clock().calibrations(),
                "done"
            );
        }
        Action::Inspect(id) => inspect(&id, out)?,
        Action::Encode { value, len } => {
            let text = encode_big(&value, len).with_context(|| format!("cannot encode {value}"))?;
            writeln!(out, "{text}")?;
        }
        Action::Decode { text, unsigned } => {
            let value = decode_big(&text, !unsigned)?;
            writeln!(out, "{value}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn inspect<W: Write>(id: &Tuid, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "tuid         {id}")?;
    writeln!(out, "seconds      {}", id.epoch_seconds())?;
    writeln!(out, "nanos        {}", id.nanos())?;
    writeln!(out, "version      {}", id.version())?;
    writeln!(out, "fingerprint  {}", id.fingerprint())?;
    writeln!(out, "random       {}", id.random())?;
    writeln!(out, "count        {}", id.count())?;
    writeln!(out, "kind         {}", id.kind())?;
    Ok(())
}
