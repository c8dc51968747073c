use plotters::prelude::*;
use proposal_model::{Configuration, ReverseCalcResult};

use crate::reverse::projection::SavingsComparison;

/// Plots cumulative savings with and without tariff escalation against the system value
pub fn plot_savings_projection(
    series: &[SavingsComparison],
    system_value: f64,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if series.is_empty() {
        return Err("Savings series is empty".into());
    }

    let root = BitMapBackend::new(filename, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let last_year = series[series.len() - 1].year as f64;
    let y_max = series
        .iter()
        .map(|point| point.escalated_cumulative.max(point.flat_cumulative))
        .fold(system_value, f64::max)
        * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption("Cumulative Savings vs System Value", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..last_year.max(1.0), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year of operation")
        .y_desc("Cumulative savings [R$]")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .map(|point| (point.year as f64, point.escalated_cumulative)),
            &GREEN,
        ))?
        .label("With tariff escalation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &GREEN));

    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .map(|point| (point.year as f64, point.flat_cumulative)),
            &BLUE,
        ))?
        .label("Flat tariff")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &BLUE));

    chart
        .draw_series(LineSeries::new(
            vec![(0.0, system_value), (last_year.max(1.0), system_value)],
            &RED,
        ))?
        .label("System value")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!("Plot saved as {}", filename);
    Ok(())
}

/// Prints a proposal in the layout used by the sales team
pub fn print_proposal_summary(result: &ReverseCalcResult, config: &Configuration) {
    let recommendation = &result.recommendation;
    let cash = &result.cash_option;
    let projection = &result.long_term_projection;

    println!("\n=== SOLAR PROPOSAL SUMMARY ===");
    println!("System Size: {:.2} kWp", recommendation.power_kwp);
    if recommendation.budget_constrained {
        println!("  (minimum size; the budget does not fully cover it)");
    }
    println!(
        "Monthly Generation: {:.0} kWh",
        recommendation.monthly_generation_kwh
    );
    println!(
        "Monthly Economy: R$ {:.2} ({:.1}% of the bill)",
        recommendation.monthly_economy,
        recommendation.bill_offset_percent()
    );
    println!(
        "Annual Economy: R$ {:.2}",
        recommendation.annual_economy()
    );
    println!("System Value: R$ {:.2}", recommendation.system_value);

    println!("\nCash Purchase:");
    println!(
        "Price with {:.1}% discount: R$ {:.2} (saves R$ {:.2})",
        cash.discount_percent * 100.0,
        cash.discounted_value,
        cash.discount_savings
    );
    match cash.payback_years {
        Some(years) => println!("Payback: {:.1} years", years),
        None => println!("Payback: not recoverable"),
    }

    println!("\nFinancing:");
    for option in &result.financing_options {
        println!(
            "{:>3} x R$ {:>9.2}  interest R$ {:>9.2}  cashflow R$ {:>9.2}  {}",
            option.installments,
            option.installment_value,
            option.total_interest(recommendation.system_value),
            option.monthly_cashflow,
            option.viability
        );
    }

    println!(
        "\n{}-Year Projection (tariff +{:.1}%/year):",
        projection.horizon_years,
        config.tariff_escalation_rate * 100.0
    );
    println!("Total Savings: R$ {:.2}", projection.total_savings);
    println!(
        "Average Annual Savings: R$ {:.2}",
        projection.average_annual_savings
    );
    println!("ROI: {:.1}%", projection.roi);
    match (projection.crossover_year, projection.payback_years) {
        (Some(year), Some(payback)) => println!(
            "Savings exceed the system value in year {} ({:.1} years)",
            year + 1,
            payback
        ),
        _ => println!("Savings do not reach the system value within the horizon"),
    }

    let lcoe = &result.lcoe;
    println!(
        "\nLCOE: R$ {:.3}/kWh vs average grid tariff R$ {:.3}/kWh ({})",
        lcoe.solar_lcoe,
        lcoe.average_grid_tariff,
        describe_lcoe_gap(lcoe.savings_per_kwh_percent)
    );
    println!("==============================\n");
}

/// Solar cost per kWh relative to the grid, worded by sign
fn describe_lcoe_gap(savings_per_kwh_percent: f64) -> String {
    if savings_per_kwh_percent >= 0.0 {
        format!("{:.1}% cheaper", savings_per_kwh_percent)
    } else {
        format!("{:.1}% more expensive", -savings_per_kwh_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let result = plot_savings_projection(&[], 10_000.0, path.to_str().unwrap());
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_lcoe_gap_wording_follows_sign() {
        assert_eq!(describe_lcoe_gap(42.04), "42.0% cheaper");
        assert_eq!(describe_lcoe_gap(0.0), "0.0% cheaper");
        assert_eq!(describe_lcoe_gap(-12.5), "12.5% more expensive");
    }
}
