//! Command handlers

use chrono::{Local, NaiveDate};

use lorry_hire_app::config::Config;
use lorry_hire_app::form::{
    build_payload, reduce, validate_for_submit, FormAction, FormState, FormStore, MoneyField,
    TextField,
};
use lorry_hire_app::repository::open_form_service;
use lorry_hire_app::ChallanFormService;
use lorry_hire_domain::model::{ConsignmentRecord, ConsignmentSearchHit};
use lorry_hire_domain::service::{coerce_amount, coerce_count};
use lorry_hire_domain::{ChallanRepository, ConsignmentSearch, PartyDirectory};
use lorry_hire_types::{EntityId, Error, OutputFormat, Result};

use crate::cli::{ChallanArgs, Cli, Commands, MoneyArgs, TdsArgs};
use crate::output::{output_challans, output_form, output_payload};

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref api_url) = cli.api_url {
        config.api_base_url = api_url.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Calc { items, money, tds } => cmd_calc(output_format, today, &items, &money, &tds),

        Commands::List { challan_number } => {
            cmd_list(&config, output_format, challan_number.as_deref()).await
        }

        Commands::Show { id } => cmd_show(&config, output_format, id, today).await,

        Commands::Create { args } => cmd_create(&config, output_format, today, &args).await,

        Commands::Update { id, args } => cmd_update(&config, output_format, today, id, &args).await,

        Commands::Delete { id } => cmd_delete(&config, id).await,

        Commands::AddCn { id, consignments } => cmd_add_cn(&config, id, &consignments).await,

        Commands::RemoveCn { id, consignment_id } => {
            cmd_remove_cn(&config, id, consignment_id).await
        }

        Commands::Settle { id, payment_date } => {
            cmd_settle(&config, id, payment_date.unwrap_or(today)).await
        }

        Commands::Config {
            show,
            set_api_url,
            set_token,
            set_company,
            set_branch,
            set_financial_year,
            set_search_min_chars,
            set_search_debounce,
            set_timeout,
            set_output,
            reset,
        } => cmd_config(ConfigChanges {
            show,
            set_api_url,
            set_token,
            set_company,
            set_branch,
            set_financial_year,
            set_search_min_chars,
            set_search_debounce,
            set_timeout,
            set_output,
            reset,
        }),
    }
}

fn money_actions(money: &MoneyArgs) -> Vec<FormAction> {
    let fields = [
        (MoneyField::Rate, &money.rate),
        (MoneyField::LorryHire, &money.lorry_hire),
        (MoneyField::LoadingCharges, &money.loading),
        (MoneyField::UnloadingCharges, &money.unloading),
        (MoneyField::DieselAdvance, &money.diesel_advance),
        (MoneyField::GstAmount, &money.gst_amount),
        (MoneyField::AdvancePaid, &money.advance),
    ];

    let mut actions: Vec<FormAction> = fields
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_ref()
                .map(|text| FormAction::SetMoney(field, text.clone()))
        })
        .collect();
    if let Some(gst) = money.gst {
        actions.push(FormAction::SetGstApplicable(gst));
    }
    actions
}

/// Policy first, so the rate and PAN land on the new policy
fn tds_actions(tds: &TdsArgs) -> Vec<FormAction> {
    let mut actions = Vec::new();
    if let Some(policy) = tds.tds {
        actions.push(FormAction::SetTdsApplicable(policy));
    }
    if let Some(ref rate) = tds.tds_rate {
        actions.push(FormAction::SetTdsRate(rate.clone()));
    }
    if let Some(ref pan) = tds.pan {
        actions.push(FormAction::SetPan(pan.clone()));
    }
    actions
}

/// `PACKAGES:WEIGHT`
fn parse_item(index: usize, raw: &str) -> Result<ConsignmentRecord> {
    let (packages, weight) = raw.split_once(':').ok_or_else(|| {
        Error::Validation(format!("item '{}' must look like PACKAGES:WEIGHT", raw))
    })?;
    let id = index as EntityId + 1;
    Ok(ConsignmentRecord::SearchHit(ConsignmentSearchHit {
        id,
        cn_number: format!("#{}", id),
        packages: coerce_count(packages),
        charge_weight: Some(coerce_amount(weight)),
        ..Default::default()
    }))
}

fn cmd_calc(
    output_format: OutputFormat,
    today: NaiveDate,
    items: &[String],
    money: &MoneyArgs,
    tds: &TdsArgs,
) -> Result<()> {
    let mut actions = Vec::new();
    for (index, raw) in items.iter().enumerate() {
        actions.push(FormAction::AddConsignment(parse_item(index, raw)?));
    }
    actions.extend(money_actions(money));
    actions.extend(tds_actions(tds));

    let state = actions
        .into_iter()
        .fold(FormState::new(today), |state, action| reduce(&state, action));
    output_form(output_format, &state)
}

async fn cmd_list(
    config: &Config,
    output_format: OutputFormat,
    challan_number: Option<&str>,
) -> Result<()> {
    let service = open_form_service(config)?;
    let challans = service.list(challan_number).await?;
    output_challans(output_format, &challans)
}

async fn cmd_show(
    config: &Config,
    output_format: OutputFormat,
    id: EntityId,
    today: NaiveDate,
) -> Result<()> {
    let service = open_form_service(config)?;
    let state = service.load_for_edit(id, today).await?;
    output_form(output_format, &state)
}

/// Pick the search hit for a consignment number: an exact match, or the only hit
async fn resolve_consignment<B>(
    service: &ChallanFormService<B>,
    term: &str,
) -> Result<ConsignmentRecord>
where
    B: ChallanRepository + ConsignmentSearch + PartyDirectory + ?Sized,
{
    let mut hits = service.search_consignments(term).await?;
    let term = term.trim();

    if let Some(pos) = hits.iter().position(|hit| match hit {
        ConsignmentRecord::SearchHit(h) => h.cn_number.eq_ignore_ascii_case(term),
        ConsignmentRecord::Persisted(p) => p.consignment.cn_number.eq_ignore_ascii_case(term),
    }) {
        return Ok(hits.swap_remove(pos));
    }

    match hits.len() {
        0 => Err(Error::NotFound(format!("consignment '{}'", term))),
        1 => Ok(hits.remove(0)),
        n => Err(Error::Validation(format!(
            "consignment '{}' is ambiguous ({} matches); use the full CN number",
            term, n
        ))),
    }
}

/// Feed the command-line fields into the form, in the order a user would fill it
async fn fill_form<B>(
    service: &ChallanFormService<B>,
    store: &mut FormStore,
    args: &ChallanArgs,
) -> Result<()>
where
    B: ChallanRepository + ConsignmentSearch + PartyDirectory + ?Sized,
{
    let texts = [
        (TextField::ChallanNumber, &args.challan_number),
        (TextField::VehicleNo, &args.vehicle_no),
        (TextField::SlipNo, &args.slip_no),
        (TextField::Remarks, &args.remarks),
    ];
    for (field, value) in texts {
        if let Some(text) = value {
            store.dispatch(FormAction::SetText(field, text.clone()));
        }
    }
    if let Some(date) = args.challan_date {
        store.dispatch(FormAction::SetChallanDate(Some(date)));
    }
    if let Some(date) = args.lorry_hire_date {
        store.dispatch(FormAction::SetLorryHireDate(Some(date)));
    }

    if args.owner.is_some() || args.broker.is_some() || args.destination.is_some() {
        let parties = service.parties().await?;
        if let Some(id) = args.owner {
            let owner = parties
                .lorry_owner(id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("lorry owner {}", id)))?;
            store.dispatch(FormAction::SelectLorryOwner(Some(owner)));
        }
        if let Some(id) = args.broker {
            let broker = parties
                .broker(id)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("broker {}", id)))?;
            store.dispatch(FormAction::SelectBroker(Some(broker)));
        }
        if let Some(id) = args.destination {
            if !parties.destinations.iter().any(|d| d.id == id) {
                return Err(Error::NotFound(format!("destination {}", id)));
            }
            store.dispatch(FormAction::SetDestination(Some(id)));
        }
    }

    for id in &args.remove_consignments {
        store.dispatch(FormAction::RemoveConsignment(*id));
    }
    for term in &args.consignments {
        let record = resolve_consignment(service, term).await?;
        store.dispatch(FormAction::AddConsignment(record));
    }

    for action in money_actions(&args.money)
        .into_iter()
        .chain(tds_actions(&args.tds))
    {
        store.dispatch(action);
    }
    Ok(())
}

async fn save_form<B>(
    service: &ChallanFormService<B>,
    output_format: OutputFormat,
    state: FormState,
    dry_run: bool,
) -> Result<()>
where
    B: ChallanRepository + ConsignmentSearch + PartyDirectory + ?Sized,
{
    if dry_run {
        let payload = build_payload(&state, service.context());
        return output_payload(&payload, &validate_for_submit(&state));
    }

    let saved = service.submit(&state).await?;
    if output_format == OutputFormat::Table {
        let verb = if state.is_edit() { "Updated" } else { "Created" };
        println!("{} lorry hire {} ({})", verb, saved.id, saved.challan_number);
    }

    let state = FormState {
        editing_id: Some(saved.id),
        ..state
    };
    output_form(output_format, &state)
}

fn totals_logging_store(state: FormState) -> FormStore {
    let mut store = FormStore::with_state(state);
    store.on_totals_changed(|totals| {
        tracing::debug!(
            packages = totals.total_packages,
            weight = %totals.total_weight,
            "consignment totals changed"
        );
    });
    store
}

async fn cmd_create(
    config: &Config,
    output_format: OutputFormat,
    today: NaiveDate,
    args: &ChallanArgs,
) -> Result<()> {
    let service = open_form_service(config)?;
    let mut store = totals_logging_store(service.new_form(today));
    fill_form(&service, &mut store, args).await?;
    save_form(&service, output_format, store.into_state(), args.dry_run).await
}

async fn cmd_update(
    config: &Config,
    output_format: OutputFormat,
    today: NaiveDate,
    id: EntityId,
    args: &ChallanArgs,
) -> Result<()> {
    let service = open_form_service(config)?;
    let mut store = totals_logging_store(service.load_for_edit(id, today).await?);
    fill_form(&service, &mut store, args).await?;
    save_form(&service, output_format, store.into_state(), args.dry_run).await
}

async fn cmd_delete(config: &Config, id: EntityId) -> Result<()> {
    let service = open_form_service(config)?;
    service.delete(id).await?;
    println!("Deleted lorry hire {}", id);
    Ok(())
}

async fn cmd_add_cn(config: &Config, id: EntityId, terms: &[String]) -> Result<()> {
    let service = open_form_service(config)?;
    let mut ids = Vec::with_capacity(terms.len());
    for term in terms {
        let record = resolve_consignment(&service, term).await?;
        if !ids.contains(&record.id()) {
            ids.push(record.id());
        }
    }
    service.add_consignments(id, &ids).await?;
    println!("Attached {} consignment(s) to lorry hire {}", ids.len(), id);
    Ok(())
}

async fn cmd_remove_cn(config: &Config, id: EntityId, consignment_id: EntityId) -> Result<()> {
    let service = open_form_service(config)?;
    service.remove_consignment(id, consignment_id).await?;
    println!("Removed consignment {} from lorry hire {}", consignment_id, id);
    Ok(())
}

async fn cmd_settle(config: &Config, id: EntityId, payment_date: NaiveDate) -> Result<()> {
    let service = open_form_service(config)?;
    service.settle(id, payment_date).await?;
    println!("Lorry hire {} settled on {}", id, payment_date);
    Ok(())
}

struct ConfigChanges {
    show: bool,
    set_api_url: Option<String>,
    set_token: Option<String>,
    set_company: Option<EntityId>,
    set_branch: Option<EntityId>,
    set_financial_year: Option<EntityId>,
    set_search_min_chars: Option<usize>,
    set_search_debounce: Option<u64>,
    set_timeout: Option<u64>,
    set_output: Option<OutputFormat>,
    reset: bool,
}

fn cmd_config(changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(url) = changes.set_api_url {
        config.api_base_url = url;
        modified = true;
    }

    if let Some(token) = changes.set_token {
        config.api_token = Some(token).filter(|t| !t.trim().is_empty());
        modified = true;
    }

    if let Some(company_id) = changes.set_company {
        config.company_id = Some(company_id);
        modified = true;
    }

    if let Some(branch_id) = changes.set_branch {
        config.branch_id = Some(branch_id);
        modified = true;
    }

    if let Some(financial_year_id) = changes.set_financial_year {
        config.financial_year_id = Some(financial_year_id);
        modified = true;
    }

    if let Some(min_chars) = changes.set_search_min_chars {
        config.search_min_chars = min_chars;
        modified = true;
    }

    if let Some(debounce_ms) = changes.set_search_debounce {
        config.search_debounce_ms = debounce_ms;
        modified = true;
    }

    if let Some(timeout) = changes.set_timeout {
        config.request_timeout_secs = timeout;
        modified = true;
    }

    if let Some(output_format) = changes.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
