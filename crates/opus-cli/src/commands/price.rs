//! Price command implementation

use std::io::Write;

use tracing::info;

use super::PricingArgs;
use crate::Result;

/// Run the price command, writing the report to `out`.
pub fn run(args: &PricingArgs, out: &mut impl Write) -> Result<()> {
    let method = args.method();
    let price = opus::price(&method, args.option_type, &args.request())?;
    info!(%method, price, "priced");
    writeln!(out, "{method} {} price: {price:.2}", args.option_type)?;
    Ok(())
}
