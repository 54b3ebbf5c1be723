use anyhow::Result;
use log::trace;

use fetiche_engine::Engine;

use crate::ConvertOpts;

pub fn convert_from_to(engine: &Engine, copts: &ConvertOpts) -> Result<()> {
    trace!("convert_from_to");

    Ok(())
}
