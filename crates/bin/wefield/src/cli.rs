//! Command-line surface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use wefield_domain::customer::HomeStatus;
use wefield_domain::id::{CustomerId, EquipmentId, JobId, PartId, TechnicianId};
use wefield_domain::job::{JobStatus, Urgency};

#[derive(Debug, Parser)]
#[command(name = "wefield", version, about = "Offline field-service tracker")]
pub struct Cli {
    /// Configuration file (defaults to ./wefield.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage customers
    #[command(subcommand)]
    Customers(CustomerCommand),

    /// Dispatch and job lifecycle
    #[command(subcommand)]
    Jobs(JobCommand),

    /// Parts stocked per location
    #[command(subcommand)]
    Inventory(InventoryCommand),

    /// Installed equipment records
    #[command(subcommand)]
    Equipment(EquipmentCommand),

    /// List technicians and whether they are on a call
    Techs,

    /// List known sites and vans
    Locations,

    /// Write the whole store to a file
    Export {
        /// Output file (defaults to the configured export file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the whole store with a previously exported file
    Import {
        /// File produced by `wefield export`
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    /// List all customers
    List,

    /// Add a customer
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "unknown")]
        home_status: HomeStatus,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Update on-site status and notes
    Update {
        id: CustomerId,
        #[arg(long)]
        home_status: HomeStatus,
        /// New notes; the saved notes are kept when omitted
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// Jobs for a day (today by default)
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Schedule a job
    Add {
        #[arg(long)]
        customer: CustomerId,
        /// Day of the visit (today by default)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "green")]
        urgency: Urgency,
        #[arg(long)]
        tech: Option<TechnicianId>,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Set a job's status (Scheduled, en-route, Working, Completed)
    Status { id: JobId, status: JobStatus },

    /// Save status and notes together
    Save {
        id: JobId,
        #[arg(long)]
        status: JobStatus,
        /// New notes; the saved notes are kept when omitted
        #[arg(long)]
        notes: Option<String>,
    },

    /// Assign a technician, or clear the assignment when omitted
    Assign {
        id: JobId,
        #[arg(long)]
        tech: Option<TechnicianId>,
    },

    /// Record parts used on a job
    AddPart {
        job: JobId,
        part: PartId,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a part usage line from a job
    RemovePart { job: JobId, part: PartId },

    /// Attach an image file to a job
    Photo { id: JobId, file: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// Items at one location, or every location
    List {
        #[arg(long)]
        location: Option<String>,
    },

    /// Add a part at a location
    Add {
        #[arg(long)]
        location: String,
        #[arg(long)]
        part_number: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0.0)]
        cost: f64,
        #[arg(long, default_value_t = 0.0)]
        sell: f64,
        #[arg(long, default_value_t = 0)]
        quantity: u32,
    },

    /// Add or remove stock; the result never drops below zero
    Adjust {
        id: PartId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// Search by model or serial (all records when no query)
    Search { query: Option<String> },

    /// Record a piece of equipment
    Add {
        #[arg(long)]
        model: String,
        #[arg(long)]
        serial: String,
        #[arg(long = "type", default_value = "")]
        kind: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Replace the notes on a record
    Notes { id: EquipmentId, notes: String },

    /// Attach an image file to a record
    Photo { id: EquipmentId, file: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn should_pass_clap_debug_assertions() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_negative_adjustment() {
        let cli = Cli::try_parse_from(["wefield", "inventory", "adjust", "p1", "-3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Inventory(InventoryCommand::Adjust { delta: -3, .. })
        ));
    }

    #[test]
    fn should_parse_job_status_with_dash() {
        let cli = Cli::try_parse_from(["wefield", "jobs", "status", "j1", "en-route"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Jobs(JobCommand::Status {
                status: JobStatus::EnRoute,
                ..
            })
        ));
    }

    #[test]
    fn should_reject_unknown_urgency() {
        let result = Cli::try_parse_from([
            "wefield", "jobs", "add", "--customer", "c1", "--urgency", "purple",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn should_parse_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["wefield", "techs", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
