//! Demo data: a four-person team and one scorecard awaiting manager review.

use chrono::TimeZone;
use chrono::Utc;
use scorecard_core::error::CoreError;
use scorecard_core::identity::{Actor, Directory};
use scorecard_core::roles::Role;
use scorecard_core::scorecard::{Kpi, Kra, Perspective, Scorecard};
use scorecard_core::status::ScorecardStatus;
use scorecard_core::types::{Date, DbId};
use scorecard_core::workflow;

pub const DEMO_CONTRIBUTOR_ID: DbId = 1;
pub const DEMO_MANAGER_ID: DbId = 2;
pub const DEMO_ADMIN_ID: DbId = 3;
pub const DEMO_EXECUTIVE_ID: DbId = 4;
pub const DEMO_SCORECARD_ID: DbId = 1;

fn date(year: i32, month: u32, day: u32) -> Result<Date, CoreError> {
    Date::from_ymd_opt(year, month, day)
        .ok_or_else(|| CoreError::Internal(format!("Invalid seed date {year}-{month}-{day}")))
}

fn actor(
    id: DbId,
    name: &str,
    role: Role,
    manager_id: Option<DbId>,
    level: &str,
    department: &str,
    date_of_joining: Date,
) -> Actor {
    Actor {
        id,
        name: name.to_string(),
        role,
        manager_id,
        level: level.to_string(),
        department: department.to_string(),
        date_of_joining,
    }
}

pub fn demo_actors() -> Result<Vec<Actor>, CoreError> {
    Ok(vec![
        actor(
            DEMO_CONTRIBUTOR_ID,
            "Saurabh",
            Role::Contributor,
            Some(DEMO_MANAGER_ID),
            "IT Op Ex",
            "IT Development",
            date(2022, 1, 10)?,
        ),
        actor(
            DEMO_MANAGER_ID,
            "Deepak Gaba",
            Role::Manager,
            None,
            "Manager",
            "IT Development",
            date(2020, 5, 15)?,
        ),
        actor(
            DEMO_ADMIN_ID,
            "Admin User",
            Role::Administrator,
            None,
            "System Admin",
            "Administration",
            date(2019, 1, 1)?,
        ),
        actor(
            DEMO_EXECUTIVE_ID,
            "Mr. CEO",
            Role::Executive,
            None,
            "CEO",
            "Executive",
            date(2018, 1, 1)?,
        ),
    ])
}

fn kpi(result: &str, process: &str, uom: &str, definition: &str, target: &str, initiatives: &str) -> Kpi {
    Kpi {
        result_kpi: result.to_string(),
        process_kpi: process.to_string(),
        unit_of_measure: uom.to_string(),
        definition: definition.to_string(),
        frequency: "Monthly".to_string(),
        base_level: "0".to_string(),
        target: target.to_string(),
        initiatives: initiatives.to_string(),
        ..Kpi::blank()
    }
}

fn perspective(name: &str, kra_name: &str, owner: &str, kpis: Vec<Kpi>) -> Perspective {
    let mut perspective = Perspective::new(name, 20);
    perspective.kra = Kra {
        name: kra_name.to_string(),
        kpi_owner: owner.to_string(),
        kpis,
        ..perspective.kra
    };
    perspective
}

fn demo_perspectives(owner: &str) -> Vec<Perspective> {
    vec![
        perspective(
            "Finance",
            "IT Operation Cost optimisation",
            owner,
            vec![
                kpi(
                    "Hardware Cost Optimisation",
                    "Hardware Procurement and Repair and Maintenance Savings",
                    "INR",
                    "Savings INR",
                    "70000",
                    "Signature Automation across Company",
                ),
                kpi(
                    "Software Cost Optimisation",
                    "Software Procurement and Repair and Maintenance Savings",
                    "INR",
                    "Savings INR",
                    "50000",
                    "QMS Complete Automation Including Billing",
                ),
            ],
        ),
        perspective(
            "Customer",
            "IT Compliance",
            owner,
            vec![kpi(
                "DBMS",
                "On Prem and Cloud Storage Management",
                "Hours",
                "IT Library",
                "576 Hours",
                "Ticketing Tool Migration - Cost Saving",
            )],
        ),
        perspective(
            "Internal Process",
            "Core IT Services & Operations",
            owner,
            vec![
                kpi(
                    "Hardware Management",
                    "Hardware Maintenance/Inventory & Troubleshooting",
                    "% OT",
                    "IT Library",
                    "100%",
                    "ITAM Improvement & New Features to be added",
                ),
                kpi(
                    "Software Management",
                    "Software Maintenance/Inventory & Troubleshooting",
                    "% OT",
                    "IT Library",
                    "100%",
                    "",
                ),
            ],
        ),
        perspective(
            "Learning and Growth",
            "Training and Development",
            owner,
            vec![kpi(
                "Team Training - IT Policies",
                "Policies and SOP training and Implementation",
                "% Adherence",
                "IT Library",
                "100%",
                "",
            )],
        ),
        perspective(
            "Infrastructure",
            "Infrastructure management",
            owner,
            vec![kpi(
                "Data Center Uptime",
                "SLA Adherence / Power & Cooling Efficiency / Downtime Incidents",
                "% Adherence",
                "IT Library",
                "100%",
                "",
            )],
        ),
    ]
}

/// Actors plus one submitted scorecard, created and submitted through the
/// workflow engine so its history is genuine.
pub fn demo_snapshot() -> Result<crate::Snapshot, CoreError> {
    let actors = demo_actors()?;
    let directory = Directory::from_actors(actors.clone())?;
    let owner = directory.require(DEMO_CONTRIBUTOR_ID)?;
    let manager = directory.require(DEMO_MANAGER_ID)?;

    let created_at = Utc
        .with_ymd_and_hms(2025, 6, 26, 9, 0, 0)
        .single()
        .ok_or_else(|| CoreError::Internal("Invalid seed timestamp".to_string()))?;

    let mut doc = Scorecard::new(owner, Some(manager), demo_perspectives(&owner.name), created_at)?;
    workflow::transition_at(
        &mut doc,
        ScorecardStatus::PendingManagerApproval,
        owner,
        &directory,
        None,
        created_at,
    )?;
    doc.mark_persisted(DEMO_SCORECARD_ID, 1);

    Ok(crate::Snapshot {
        actors,
        scorecards: vec![doc],
    })
}
