//! Greeks command implementation

use std::io::Write;

use tracing::info;

use super::PricingArgs;
use crate::Result;

/// Run the greeks command, writing the report to `out`.
pub fn run(args: &PricingArgs, out: &mut impl Write) -> Result<()> {
    let method = args.method();
    let greeks = opus::greeks(&method, args.option_type, &args.request())?;
    info!(%method, ?greeks, "greeks estimated");

    writeln!(out, "{method} {}", args.option_type)?;
    if let Some(price) = greeks.price {
        writeln!(out, "  Price: {price:.2}")?;
    }
    writeln!(out, "  Delta: {:.4}", greeks.delta)?;
    writeln!(out, "  Gamma: {:.6}", greeks.gamma)?;
    writeln!(out, "  Theta: {:.4} (per year)", greeks.theta)?;
    writeln!(out, "  Vega:  {:.4}", greeks.vega)?;
    writeln!(out, "  Rho:   {:.4}", greeks.rho)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::parse;
    use crate::CliError;

    #[test]
    fn analytic_report() {
        let mut out = Vec::new();
        run(&parse(&[]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Black-Scholes Call");
        assert_eq!(lines[1], "  Price: 8.92");
        assert_eq!(lines[2], "  Delta: 0.5793");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn asian_greeks_fail() {
        let mut out = Vec::new();
        let args = parse(&["-m", "monte-carlo", "--style", "asian", "--simulations", "10"]);
        let err = run(&args, &mut out).unwrap_err();
        assert!(matches!(err, CliError::Pricing(opus::Error::InvalidArgument(_))));
        assert!(err.to_string().contains("Asian"));
    }
}
