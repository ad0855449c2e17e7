//! Interactive menu.
//!
//! A line-based loop over any `BufRead`/`Write` pair. It owns the roster
//! for the session and re-reads the data file before each menu so external
//! edits show up. End of input ends the session.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::commands::open_store;
use crate::error::Result;
use crate::model::StudentPatch;
use crate::storage;
use crate::store::Store;
use crate::sync::{Exporter, ImportMode, ImportOutcome, Importer, DEFAULT_CSV_PATH};

/// Run the interactive menu on stdin/stdout.
pub fn execute(data_path: Option<&PathBuf>) -> Result<()> {
    let (data_path, store) = open_store(data_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let clear = stdout.is_terminal();

    Shell::new(stdin.lock(), stdout.lock(), data_path, store)
        .clear_screen(clear)
        .run()
}

/// What to do after a student-menu action.
enum Next {
    Stay,
    Leave,
}

/// Interactive session state.
pub struct Shell<R, W> {
    input: R,
    output: W,
    data_path: PathBuf,
    store: Store,
    clear: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, data_path: PathBuf, store: Store) -> Self {
        Self {
            input,
            output,
            data_path,
            store,
            clear: false,
        }
    }

    /// Clear the terminal before each menu.
    #[must_use]
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// The roster as the session last saw it.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the terminal or the data file.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if !self.ensure_students()? {
                return Ok(());
            }
            self.clear()?;
            writeln!(self.output, "{}", "Main Menu".bold().cyan())?;
            writeln!(
                self.output,
                "[l]ist  [e]dit  [a]dd  e[x]port  [i]mport  [s]ave  [q]uit"
            )?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            match choice.to_lowercase().as_str() {
                "l" | "list" => {
                    self.list()?;
                    self.pause()?;
                }
                "e" | "edit" => self.edit()?,
                "a" | "add" => self.add()?,
                "x" | "export" => {
                    let written = Exporter::new(&mut self.store, &self.data_path)
                        .export(Path::new(DEFAULT_CSV_PATH))?;
                    writeln!(self.output, "Exported to {}", written.display())?;
                    self.pause()?;
                }
                "i" | "import" => self.import()?,
                "s" | "save" => {
                    storage::save(&self.store, &self.data_path)?;
                    writeln!(self.output, "Saved.")?;
                    self.pause()?;
                }
                "q" | "quit" | "exit" => {
                    if self.confirm("Save before quitting?", false)? {
                        storage::save(&self.store, &self.data_path)?;
                        writeln!(self.output, "Saved.")?;
                        self.pause()?;
                    }
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Unknown option.")?;
                    self.pause()?;
                }
            }
        }
    }

    /// Make sure the roster is not empty, prompting for a CSV to merge.
    ///
    /// Returns `false` if input ended first.
    fn ensure_students(&mut self) -> Result<bool> {
        loop {
            storage::refresh(&mut self.store, &self.data_path)?;
            if !self.store.is_empty() {
                return Ok(true);
            }

            self.clear()?;
            writeln!(self.output, "No students found.")?;
            let Some(path) =
                self.prompt(&format!("Import CSV path (blank={DEFAULT_CSV_PATH}): "))?
            else {
                return Ok(false);
            };
            let path = csv_path_or_default(&path);

            let outcome = Importer::new(&mut self.store, &self.data_path, ImportMode::Merge)
                .import(&path)?;
            self.report_rejected(&outcome)?;

            if !self.store.is_empty() {
                writeln!(self.output, "Imported {}.", outcome.count())?;
                self.pause()?;
                return Ok(true);
            }
            writeln!(self.output, "Import failed. Try again.")?;
            self.pause()?;
        }
    }

    fn list(&mut self) -> Result<()> {
        writeln!(self.output, "Total: {}", self.store.len())?;
        for student in &self.store {
            writeln!(self.output, "{}", student.summary())?;
        }
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        let Some(raw_id) = self.prompt("ID to edit: ")? else {
            return Ok(());
        };
        let Some(id) = parse_digits::<u64>(&raw_id) else {
            writeln!(self.output, "Not a number.")?;
            return self.pause();
        };

        storage::refresh(&mut self.store, &self.data_path)?;
        if self.store.find(id).is_none() {
            writeln!(self.output, "No such student.")?;
            return self.pause();
        }
        self.student_menu(id)
    }

    fn add(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        let Some(raw_age) = self.prompt("Age: ")? else {
            return Ok(());
        };
        let Some(age) = parse_digits::<u32>(&raw_age) else {
            writeln!(self.output, "Age must be a number.")?;
            return self.pause();
        };
        let full_time = self.confirm("Full-time?", true)?;

        storage::refresh(&mut self.store, &self.data_path)?;
        let student = self.store.create(name, age, full_time);
        storage::save(&self.store, &self.data_path)?;
        writeln!(self.output, "Added -> {}", student.summary())?;
        self.pause()
    }

    fn import(&mut self) -> Result<()> {
        let Some(path) = self.prompt(&format!("CSV path (blank={DEFAULT_CSV_PATH}): "))? else {
            return Ok(());
        };
        let path = csv_path_or_default(&path);
        let Some(raw_mode) = self.prompt("Mode: [m]erge or [r]eplace? ")? else {
            return Ok(());
        };
        // Anything that is not replace falls back to merge.
        let mode = raw_mode.parse::<ImportMode>().unwrap_or_default();

        let outcome = Importer::new(&mut self.store, &self.data_path, mode).import(&path)?;
        self.report_rejected(&outcome)?;
        writeln!(self.output, "Imported {} ({mode}).", outcome.count())?;
        self.pause()
    }

    fn student_menu(&mut self, id: u64) -> Result<()> {
        loop {
            storage::refresh(&mut self.store, &self.data_path)?;
            self.clear()?;
            let Some(student) = self.store.find(id) else {
                writeln!(self.output, "Student removed.")?;
                return Ok(());
            };
            let summary = student.summary();
            writeln!(self.output, "\n{} {summary}", "Student ->".bold())?;
            writeln!(
                self.output,
                "[v]iew  [n]ame  [a]ge  [t]oggle full-time  [d]elete  [s]ave  [r]eload  [q]uit"
            )?;
            let Some(choice) = self.prompt("> ")? else {
                return Ok(());
            };

            if let Next::Leave = self.student_action(id, &choice.to_lowercase(), &summary)? {
                return Ok(());
            }
        }
    }

    fn student_action(&mut self, id: u64, choice: &str, summary: &str) -> Result<Next> {
        match choice {
            "v" | "view" => {
                writeln!(self.output, "{summary}")?;
                self.pause()?;
            }
            "n" | "name" => {
                let Some(name) = self.prompt("New name: ")? else {
                    return Ok(Next::Leave);
                };
                if !name.is_empty() {
                    self.apply(id, StudentPatch {
                        name: Some(name),
                        ..StudentPatch::default()
                    })?;
                    writeln!(self.output, "Name updated.")?;
                }
                self.pause()?;
            }
            "a" | "age" => {
                let Some(raw_age) = self.prompt("New age: ")? else {
                    return Ok(Next::Leave);
                };
                if let Some(age) = parse_digits::<u32>(&raw_age) {
                    self.apply(id, StudentPatch {
                        age: Some(age),
                        ..StudentPatch::default()
                    })?;
                    writeln!(self.output, "Age updated.")?;
                } else {
                    writeln!(self.output, "Invalid age.")?;
                }
                self.pause()?;
            }
            "t" | "toggle" => {
                let full_time = self.store.find(id).is_some_and(|s| !s.full_time);
                self.apply(id, StudentPatch {
                    full_time: Some(full_time),
                    ..StudentPatch::default()
                })?;
                writeln!(self.output, "Full-time toggled.")?;
                self.pause()?;
            }
            "d" | "delete" => {
                let Some(confirm) = self.prompt("Type DELETE to confirm: ")? else {
                    return Ok(Next::Leave);
                };
                if confirm == "DELETE" {
                    self.store.delete(id);
                    storage::save(&self.store, &self.data_path)?;
                    writeln!(self.output, "Deleted.")?;
                    self.pause()?;
                    return Ok(Next::Leave);
                }
                writeln!(self.output, "Cancelled.")?;
                self.pause()?;
            }
            "s" | "save" => {
                storage::save(&self.store, &self.data_path)?;
                writeln!(self.output, "Saved.")?;
                self.pause()?;
            }
            "r" | "reload" => {
                writeln!(self.output, "Reloaded.")?;
                self.pause()?;
            }
            "q" | "quit" | "exit" => return Ok(Next::Leave),
            _ => {
                writeln!(self.output, "Unknown option.")?;
                self.pause()?;
            }
        }
        Ok(Next::Stay)
    }

    /// Update a student and persist immediately.
    fn apply(&mut self, id: u64, patch: StudentPatch) -> Result<()> {
        if self.store.update(id, patch).is_some() {
            storage::save(&self.store, &self.data_path)?;
        }
        Ok(())
    }

    fn report_rejected(&mut self, outcome: &ImportOutcome) -> Result<()> {
        match outcome {
            ImportOutcome::NotFound(path) => {
                writeln!(self.output, "CSV not found: {}", path.display())?;
            }
            ImportOutcome::Empty(_) => writeln!(self.output, "CSV empty.")?,
            ImportOutcome::Imported(_) => {}
        }
        Ok(())
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no prompt; blank input (or end of input) takes `default`.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        let Some(raw) = self.prompt(&format!("{prompt} ({hint}): "))? else {
            return Ok(default);
        };
        if raw.is_empty() {
            return Ok(default);
        }
        Ok(matches!(
            raw.to_lowercase().as_str(),
            "y" | "yes" | "true" | "1"
        ))
    }

    fn pause(&mut self) -> Result<()> {
        self.prompt("Press Enter to continue...")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.clear {
            write!(self.output, "\x1B[2J\x1B[1;1H")?;
            self.output.flush()?;
        }
        Ok(())
    }
}

fn csv_path_or_default(input: &str) -> PathBuf {
    if input.is_empty() {
        PathBuf::from(DEFAULT_CSV_PATH)
    } else {
        PathBuf::from(input)
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_digits<T: std::str::FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;
    use std::fs;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir, students: Vec<Student>) -> (PathBuf, Store) {
        let data_path = dir.path().join("data.json");
        let store = Store::from_students(students);
        storage::save(&store, &data_path).unwrap();
        (data_path, store)
    }

    fn run_script(data_path: &Path, store: Store, script: &str) -> (String, Store) {
        let mut output = Vec::new();
        let mut shell = Shell::new(script.as_bytes(), &mut output, data_path.to_path_buf(), store);
        shell.run().unwrap();
        let store = shell.store().clone();
        drop(shell);
        (String::from_utf8(output).unwrap(), store)
    }

    #[test]
    fn test_list_and_quit() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);

        let (out, _) = run_script(&data_path, store, "l\n\nq\nn\n");

        assert!(out.contains("Main Menu"));
        assert!(out.contains("Total: 1"));
        assert!(out.contains("ID: 1 | Name: Ada | Age: 20 | Full-time: Yes"));
        assert!(out.ends_with("Goodbye.\n"));
    }

    #[test]
    fn test_add_persists() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);

        let (out, _) = run_script(&data_path, store, "a\nGrace\n31\nn\n\nq\n\n");

        assert!(out.contains("Added -> ID: 2 | Name: Grace | Age: 31 | Full-time: No"));
        let saved = storage::load(&data_path).unwrap();
        assert_eq!(saved.find(2), Some(&Student::new(2, "Grace", 31, false)));
    }

    #[test]
    fn test_add_rejects_non_numeric_age() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);

        let (out, _) = run_script(&data_path, store, "a\nGrace\n-4\n\nq\n\n");

        assert!(out.contains("Age must be a number."));
        assert_eq!(storage::load(&data_path).unwrap().len(), 1);
    }

    #[test]
    fn test_edit_rename_and_toggle() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);

        let script = "e\n1\nn\nAda Lovelace\n\nt\n\nq\nq\n\n";
        let (out, _) = run_script(&data_path, store, script);

        assert!(out.contains("Name updated."));
        assert!(out.contains("Full-time toggled."));
        let saved = storage::load(&data_path).unwrap();
        assert_eq!(saved.find(1), Some(&Student::new(1, "Ada Lovelace", 20, false)));
    }

    #[test]
    fn test_edit_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);

        let (out, _) = run_script(&data_path, store, "e\n9\n\ne\nx\n\nq\n\n");

        assert!(out.contains("No such student."));
        assert!(out.contains("Not a number."));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(
            &temp_dir,
            vec![Student::new(1, "Ada", 20, true), Student::new(2, "Bob", 22, false)],
        );

        let script = "e\n2\nd\ndelete\n\nd\nDELETE\n\nq\n\n";
        let (out, _) = run_script(&data_path, store, script);

        assert!(out.contains("Cancelled."));
        assert!(out.contains("Deleted."));
        let saved = storage::load(&data_path).unwrap();
        assert!(saved.find(2).is_none());
        assert!(saved.find(1).is_some());
    }

    #[test]
    fn test_empty_roster_prompts_for_import() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![]);
        let csv_path = temp_dir.path().join("seed.csv");
        fs::write(&csv_path, "id,name,age,full-time\n1,Ada,20,yes\n").unwrap();

        let missing = temp_dir.path().join("missing.csv");
        let script = format!("{}\n\n{}\n\nq\n\n", missing.display(), csv_path.display());
        let (out, store) = run_script(&data_path, store, &script);

        assert!(out.contains("No students found."));
        assert!(out.contains("CSV not found"));
        assert!(out.contains("Import failed. Try again."));
        assert!(out.contains("Imported 1."));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![]);

        let (out, store) = run_script(&data_path, store, "");

        assert!(out.contains("No students found."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_replace_from_menu() {
        let temp_dir = TempDir::new().unwrap();
        let (data_path, store) = seeded(&temp_dir, vec![Student::new(1, "Ada", 20, true)]);
        let csv_path = temp_dir.path().join("new.csv");
        fs::write(&csv_path, "id,name,age,full-time\n5,Eve,30,no\n,,21,yes\n").unwrap();

        let script = format!("i\n{}\nr\n\nq\n\n", csv_path.display());
        let (out, store) = run_script(&data_path, store, &script);

        assert!(out.contains("Imported 2 (replace)."));
        let ids: Vec<_> = store.iter().map(|s| s.id).collect();
        assert_eq!(ids, [5, 6]);
        assert_eq!(store.find(6).unwrap().name, "Student6");
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits::<u32>("42"), Some(42));
        assert_eq!(parse_digits::<u32>(""), None);
        assert_eq!(parse_digits::<u32>("+4"), None);
        assert_eq!(parse_digits::<u32>("4a"), None);
    }
}
