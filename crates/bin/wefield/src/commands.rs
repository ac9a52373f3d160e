//! Command execution — translates parsed commands into store operations and
//! prints the results.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, anyhow};
use chrono::{Local, NaiveDate};
use wefield_app::FieldServiceStore;
use wefield_app::ports::DocumentStore;
use wefield_domain::customer::Customer;
use wefield_domain::equipment::Equipment;
use wefield_domain::inventory::InventoryItem;
use wefield_domain::job::Job;
use wefield_domain::photo::Photo;

use crate::cli::{Command, CustomerCommand, EquipmentCommand, InventoryCommand, JobCommand};
use crate::config::Config;

/// Run one command against the store, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns any store, I/O, or photo error encountered.
pub async fn run<S: DocumentStore, W: Write>(
    command: Command,
    store: &mut FieldServiceStore<S>,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Command::Customers(cmd) => customers(cmd, store, out),
        Command::Jobs(cmd) => jobs(cmd, store, out).await,
        Command::Inventory(cmd) => inventory(cmd, store, out),
        Command::Equipment(cmd) => equipment(cmd, store, out).await,
        Command::Techs => {
            for tech in store.technicians() {
                writeln!(out, "{}  {:<8} {:<12} {}", tech.id, tech.name, tech.location, tech.status)?;
            }
            Ok(())
        }
        Command::Locations => {
            for location in store.locations() {
                writeln!(out, "{location}")?;
            }
            Ok(())
        }
        Command::Export { out: path } => {
            let path = path.unwrap_or_else(|| config.export.file_name.clone());
            let document = store.export_snapshot()?;
            wefield_adapter_storage_file::write_atomically(&path, &document)?;
            tracing::info!(path = %path.display(), bytes = document.len(), "store exported");
            writeln!(out, "exported to {}", path.display())?;
            Ok(())
        }
        Command::Import { file } => {
            let document = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            store.import_snapshot(&document)?;
            writeln!(out, "import complete")?;
            Ok(())
        }
    }
}

fn customers<S: DocumentStore, W: Write>(
    command: CustomerCommand,
    store: &mut FieldServiceStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        CustomerCommand::List => {
            for customer in store.customers() {
                print_customer(out, customer)?;
            }
        }
        CustomerCommand::Add {
            name,
            address,
            home_status,
            notes,
        } => {
            let mut builder = Customer::builder()
                .name(name)
                .address(address)
                .home_status(home_status);
            if let Some(notes) = notes {
                builder = builder.notes(notes);
            }
            let customer = store.create_customer(builder.build()?)?;
            print_customer(out, &customer)?;
        }
        CustomerCommand::Update {
            id,
            home_status,
            notes,
        } => {
            let notes = match notes {
                Some(notes) => Some(notes),
                None => store.customer(&id)?.notes.clone(),
            };
            let customer = store.update_customer(&id, home_status, notes)?;
            print_customer(out, &customer)?;
        }
    }
    Ok(())
}

async fn jobs<S: DocumentStore, W: Write>(
    command: JobCommand,
    store: &mut FieldServiceStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        JobCommand::List { date } => {
            let date = date.unwrap_or_else(today);
            writeln!(out, "Dispatch - {date}")?;
            for job in store.find_jobs_by_date(date) {
                let customer = store.customer(&job.customer_id).ok();
                writeln!(
                    out,
                    "{}  {:<20} {:<6} {:<9} {}",
                    job.id,
                    customer.map_or("Unknown Customer", |c| c.name.as_str()),
                    job.urgency,
                    job.status,
                    customer.map_or("No address", |c| c.address.as_str()),
                )?;
            }
        }
        JobCommand::Add {
            customer,
            date,
            urgency,
            tech,
            notes,
        } => {
            let mut builder = Job::builder()
                .date(date.unwrap_or_else(today))
                .customer_id(customer)
                .urgency(urgency)
                .notes(notes);
            if let Some(tech) = tech {
                builder = builder.assigned_tech(tech);
            }
            let job = store.create_job(builder.build()?)?;
            print_job(out, &job)?;
        }
        JobCommand::Status { id, status } => {
            let job = store.update_job_status(&id, status)?;
            print_job(out, &job)?;
        }
        JobCommand::Save { id, status, notes } => {
            let notes = match notes {
                Some(notes) => notes,
                None => store.job(&id)?.notes.clone(),
            };
            let job = store.save_job(&id, status, notes)?;
            print_job(out, &job)?;
        }
        JobCommand::Assign { id, tech } => {
            let job = store.assign_technician(&id, tech)?;
            print_job(out, &job)?;
        }
        JobCommand::AddPart {
            job,
            part,
            quantity,
        } => {
            let job = store.add_part_usage(&job, &part, quantity)?;
            print_job(out, &job)?;
        }
        JobCommand::RemovePart { job, part } => {
            let job = store.remove_part_usage(&job, &part)?;
            print_job(out, &job)?;
        }
        JobCommand::Photo { id, file } => {
            let photo = read_photo(&file).await?;
            let job = store.attach_job_photo(&id, photo)?;
            print_job(out, &job)?;
        }
    }
    Ok(())
}

fn inventory<S: DocumentStore, W: Write>(
    command: InventoryCommand,
    store: &mut FieldServiceStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        InventoryCommand::List { location } => {
            let items: Vec<&InventoryItem> = match &location {
                Some(location) => store.find_inventory_by_location(location),
                None => store.inventory().iter().collect(),
            };
            for item in items {
                print_item(out, item)?;
            }
        }
        InventoryCommand::Add {
            location,
            part_number,
            description,
            cost,
            sell,
            quantity,
        } => {
            let item = InventoryItem::builder()
                .location(location)
                .part_number(part_number)
                .description(description)
                .cost(cost)
                .sell(sell)
                .quantity(quantity)
                .build()?;
            let item = store.create_inventory_item(item)?;
            print_item(out, &item)?;
        }
        InventoryCommand::Adjust { id, delta } => {
            let item = store.adjust_inventory_quantity(&id, delta)?;
            print_item(out, &item)?;
        }
    }
    Ok(())
}

async fn equipment<S: DocumentStore, W: Write>(
    command: EquipmentCommand,
    store: &mut FieldServiceStore<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        EquipmentCommand::Search { query } => {
            for equipment in store.search_equipment(query.as_deref().unwrap_or_default()) {
                print_equipment(out, equipment)?;
            }
        }
        EquipmentCommand::Add {
            model,
            serial,
            kind,
            location,
            notes,
        } => {
            let equipment = Equipment::builder()
                .model(model)
                .serial(serial)
                .kind(kind)
                .location(location)
                .notes(notes)
                .build()?;
            let equipment = store.create_equipment(equipment)?;
            print_equipment(out, &equipment)?;
        }
        EquipmentCommand::Notes { id, notes } => {
            let equipment = store.update_equipment_notes(&id, notes)?;
            print_equipment(out, &equipment)?;
        }
        EquipmentCommand::Photo { id, file } => {
            let photo = read_photo(&file).await?;
            let equipment = store.attach_equipment_photo(&id, photo)?;
            print_equipment(out, &equipment)?;
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Media type for an image file, from its extension.
fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

/// Read an image file into an embeddable photo.
async fn read_photo(path: &Path) -> anyhow::Result<Photo> {
    let mime = image_mime(path)
        .ok_or_else(|| anyhow!("{} is not a supported image file", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Photo::from_image_bytes(mime, &bytes)?)
}

fn print_customer<W: Write>(out: &mut W, customer: &Customer) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {:<20} {:<9} {}",
        customer.id, customer.name, customer.home_status, customer.address
    )?;
    if let Some(notes) = &customer.notes {
        writeln!(out, "    notes: {notes}")?;
    }
    Ok(())
}

fn print_job<W: Write>(out: &mut W, job: &Job) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {} {:<6} {:<9} parts={} photos={}",
        job.id,
        job.date,
        job.urgency,
        job.status,
        job.parts_used.len(),
        job.photos.len()
    )
}

fn print_item<W: Write>(out: &mut W, item: &InventoryItem) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {:<12} {:<12} {} | Cost: {} | Sell: {} | Qty: {}",
        item.id, item.location, item.part_number, item.description, item.cost, item.sell, item.quantity
    )
}

fn print_equipment<W: Write>(out: &mut W, equipment: &Equipment) -> std::io::Result<()> {
    writeln!(
        out,
        "{}  {} / {}  {} @ {} photos={}",
        equipment.id,
        equipment.model,
        equipment.serial,
        equipment.kind,
        equipment.location,
        equipment.photos.len()
    )
}
