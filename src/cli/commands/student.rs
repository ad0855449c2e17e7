//! Student command implementations (list, show, add, update, toggle, delete).
//!
//! Every command starts from the data file and mutating commands save
//! before returning.

use crate::cli::{AddArgs, UpdateArgs};
use crate::cli::commands::open_store;
use crate::error::{Error, Result};
use crate::model::{Student, StudentPatch};
use crate::storage;
use serde::Serialize;
use std::path::PathBuf;

/// Output for student list.
#[derive(Serialize)]
struct StudentListOutput<'a> {
    students: &'a [Student],
    count: usize,
    total: usize,
}

/// Output for delete.
#[derive(Serialize)]
struct DeleteOutput {
    id: u64,
    deleted: bool,
}

/// List students, optionally only the first `limit`. A limit of 0 lists all.
pub fn list(limit: Option<usize>, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (_, store) = open_store(data_path)?;
    let shown = match limit {
        Some(n) if n > 0 => &store.students()[..n.min(store.len())],
        _ => store.students(),
    };

    if json {
        let output = StudentListOutput {
            students: shown,
            count: shown.len(),
            total: store.len(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Total: {}", store.len());
        for student in shown {
            println!("{}", student.summary());
        }
    }

    Ok(())
}

/// Show one student.
pub fn show(id: u64, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (_, store) = open_store(data_path)?;
    let student = store.find(id).ok_or(Error::StudentNotFound { id })?;
    print_student(student, json)
}

/// Create a student and save.
pub fn add(args: &AddArgs, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (data_path, mut store) = open_store(data_path)?;

    let name = args.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidArgument("name must not be empty".to_string()));
    }

    let student = store.create(name, args.age, args.full_time);
    storage::save(&store, &data_path)?;
    tracing::info!(id = student.id, "Added student");

    if json {
        println!("{}", serde_json::to_string(&student)?);
    } else {
        println!("Added -> {}", student.summary());
    }
    Ok(())
}

/// Apply the provided fields to a student and save.
pub fn update(args: &UpdateArgs, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let patch = StudentPatch {
        name: args.name.as_deref().map(str::trim).map(String::from),
        age: args.age,
        full_time: args.full_time,
    };
    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to update: pass --name, --age or --full-time".to_string(),
        ));
    }
    if patch.name.as_deref() == Some("") {
        return Err(Error::InvalidArgument("name must not be empty".to_string()));
    }

    mutate(args.id, patch, data_path, json, "Updated")
}

/// Flip a student's full-time flag and save.
pub fn toggle(id: u64, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (data_path, mut store) = open_store(data_path)?;
    let current = store.find(id).ok_or(Error::StudentNotFound { id })?;
    let patch = StudentPatch {
        full_time: Some(!current.full_time),
        ..StudentPatch::default()
    };

    let student = store
        .update(id, patch)
        .cloned()
        .ok_or(Error::StudentNotFound { id })?;
    storage::save(&store, &data_path)?;
    report(&student, json, "Toggled")
}

/// Delete a student and save.
pub fn delete(id: u64, data_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (data_path, mut store) = open_store(data_path)?;

    if store.delete(id) == 0 {
        return Err(Error::StudentNotFound { id });
    }
    storage::save(&store, &data_path)?;
    tracing::info!(id, "Deleted student");

    if json {
        println!("{}", serde_json::to_string(&DeleteOutput { id, deleted: true })?);
    } else {
        println!("Deleted student {id}");
    }
    Ok(())
}

fn mutate(
    id: u64,
    patch: StudentPatch,
    data_path: Option<&PathBuf>,
    json: bool,
    verb: &str,
) -> Result<()> {
    let (data_path, mut store) = open_store(data_path)?;

    let student = store
        .update(id, patch)
        .cloned()
        .ok_or(Error::StudentNotFound { id })?;
    storage::save(&store, &data_path)?;
    report(&student, json, verb)
}

fn report(student: &Student, json: bool, verb: &str) -> Result<()> {
    if json {
        print_student(student, true)
    } else {
        println!("{verb} -> {}", student.summary());
        Ok(())
    }
}

fn print_student(student: &Student, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(student)?);
    } else {
        println!("{}", student.summary());
    }
    Ok(())
}
