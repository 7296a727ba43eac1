//! Output formatting module
//!
//! Amounts are rounded to two places here and nowhere earlier.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use lorry_hire_app::form::FormState;
use lorry_hire_app::form::ValidationIssue;
use lorry_hire_domain::model::{
    ChallanPayload, Consignment, LorryHireChallan, PanSource, TdsState,
};
use lorry_hire_domain::service::{round_for_display, Settlement, Totals};
use lorry_hire_types::{EntityId, OutputFormat, Result};

fn money(value: Decimal) -> String {
    format!("{:.2}", round_for_display(value))
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

/// JSON view of a form: inputs, selection and the derived figures
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormSummary<'a> {
    id: Option<EntityId>,
    challan_number: &'a str,
    challan_date: Option<NaiveDate>,
    lorry_hire_date: Option<NaiveDate>,
    vehicle_no: &'a str,
    lorry_owner_id: Option<EntityId>,
    broker_id: Option<EntityId>,
    destination_id: Option<EntityId>,
    consignments: &'a [Consignment],
    totals: Totals,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    lorry_hire: Decimal,
    settlement: Settlement,
    tds: &'a TdsState,
}

impl<'a> FormSummary<'a> {
    fn new(state: &'a FormState) -> Self {
        Self {
            id: state.editing_id,
            challan_number: &state.challan_number,
            challan_date: state.challan_date,
            lorry_hire_date: state.lorry_hire_date,
            vehicle_no: &state.vehicle_no,
            lorry_owner_id: state.lorry_owner.as_ref().map(|p| p.id),
            broker_id: state.broker.as_ref().map(|p| p.id),
            destination_id: state.destination_id,
            consignments: state.consignments.as_slice(),
            totals: state.totals,
            lorry_hire: round_for_display(state.effective_lorry_hire()),
            settlement: state.settlement.rounded(),
            tds: &state.tds,
        }
    }
}

fn print_consignments(consignments: &[Consignment]) {
    if consignments.is_empty() {
        println!("No consignments selected.");
        return;
    }

    println!(
        "{:<8} {:<14} {:>8} {:>12} {:<6} {:<8} {:<30}",
        "ID", "CN No", "Pkgs", "Weight(kg)", "UOM", "Rate on", "Route"
    );
    println!("{}", "-".repeat(92));
    for cn in consignments {
        let route = format!(
            "{} -> {}",
            cn.from_destination.label(),
            cn.to_destination.label()
        );
        println!(
            "{:<8} {:<14} {:>8} {:>12} {:<6} {:<8} {:<30}",
            cn.id,
            truncate(or_dash(&cn.cn_number), 14),
            cn.packages,
            money(cn.net_weight),
            truncate(&cn.package_uom, 6),
            truncate(&cn.rate_on, 8),
            truncate(&route, 30)
        );
    }
}

fn print_tds(tds: &TdsState) {
    if !tds.applicable.deducts() {
        println!("TDS:             not applicable");
        return;
    }

    let rate = tds
        .rate
        .map(|r| format!("{}%", r.normalize()))
        .unwrap_or_else(|| "(rate not set)".to_string());
    println!("TDS policy:      {} @ {}", tds.applicable, rate);

    let source = match tds.pan_source {
        Some(PanSource::Broker) => "from broker",
        Some(PanSource::LorryOwner) => "from lorry owner",
        Some(PanSource::Manual) | None => "entered manually",
    };
    println!("PAN:             {} ({})", or_dash(&tds.pan_number), source);
    if let Some(hint) = tds.hint {
        println!("                 ! {}", hint);
    }
}

fn print_settlement(state: &FormState) {
    let s = state.settlement;
    println!("\nSettlement");
    println!("==========");
    println!("Calculated hire: {}", money(s.calculated_hire));
    println!(
        "Lorry hire:      {}{}",
        money(state.effective_lorry_hire()),
        if state.lorry_hire_overridden { " (entered)" } else { "" }
    );
    println!("Total amount:    {}", money(s.total_amount));
    print_tds(&state.tds);
    println!("TDS amount:      {}", money(s.tds_amount));
    println!("Balance payable: {}", money(s.balance_payable));
}

/// Totals and settlement for a form (also used by `calc`)
pub fn output_form(output_format: OutputFormat, state: &FormState) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(&FormSummary::new(state))?;
        println!("{}", content);
        return Ok(());
    }

    if state.is_edit() || !state.challan_number.is_empty() {
        println!("\nLorry Hire Challan");
        println!("==================");
        if let Some(id) = state.editing_id {
            println!("ID:              {}", id);
        }
        println!("Challan No:      {}", or_dash(&state.challan_number));
        println!("Challan date:    {}", date(state.challan_date));
        println!("Hire date:       {}", date(state.lorry_hire_date));
        println!("Vehicle:         {}", or_dash(&state.vehicle_no));
        if let Some(owner) = &state.lorry_owner {
            println!("Lorry owner:     {} (#{})", owner.name, owner.id);
        }
        if let Some(broker) = &state.broker {
            println!("Broker:          {} (#{})", broker.name, broker.id);
        }
        println!();
    }

    print_consignments(state.consignments.as_slice());
    println!(
        "\nTotals:          {} pkgs, {} kg",
        state.totals.total_packages,
        money(state.totals.total_weight)
    );

    print_settlement(state);
    Ok(())
}

pub fn output_challans(output_format: OutputFormat, challans: &[LorryHireChallan]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(challans)?;
        println!("{}", content);
        return Ok(());
    }

    println!("Lorry Hire Challans");
    println!("===================");
    if challans.is_empty() {
        println!("No challans found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<14} {:<10} {:<12} {:<20} {:>12} {:>12} {:<8}",
        "ID", "Challan No", "Date", "Vehicle", "Owner", "Hire", "Balance", "Settled"
    );
    println!("{}", "-".repeat(100));

    for challan in challans {
        let owner = challan
            .lorry_owner
            .as_ref()
            .map(|p| p.name.clone())
            .or_else(|| challan.owner_id().map(|id| format!("#{}", id)))
            .unwrap_or_else(|| "-".to_string());
        let settled = match (challan.is_settled, challan.payment_date) {
            (true, Some(paid)) => paid.format("%m/%d").to_string(),
            (true, None) => "yes".to_string(),
            (false, _) => "no".to_string(),
        };

        println!(
            "{:<6} {:<14} {:<10} {:<12} {:<20} {:>12} {:>12} {:<8}",
            challan.id,
            truncate(or_dash(&challan.challan_number), 14),
            date(challan.challan_date),
            truncate(or_dash(&challan.vehicle_no), 12),
            truncate(&owner, 20),
            optional_money(challan.lorry_hire),
            optional_money(challan.balance_payable),
            settled
        );
    }

    println!();
    println!("Total: {}", challans.len());
    Ok(())
}

/// Dry-run output; always JSON since it is exactly what would be sent
pub fn output_payload(payload: &ChallanPayload, issues: &[ValidationIssue]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    for issue in issues {
        eprintln!("warning: {}", issue);
    }
    Ok(())
}
