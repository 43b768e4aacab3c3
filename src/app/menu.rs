use crate::core::store::HospitalManagement;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::validation::parse_age;
use std::io::{BufRead, Write};

const MENU: &str = "\n====== HOSPITAL MENU ======
1. Add Patient
2. Add Doctor
3. Assign Doctor to Patient
4. Search Patient
5. Search Doctor
6. View All Patients
7. View All Doctors
8. Discharge Patient
9. View Assignments
0. Exit
===========================\n";

enum Flow {
    Continue,
    Exit,
}

/// Numbered text menu driving a store. One store operation per choice; end
/// of input is treated as exit.
pub struct Menu<'a, S: Storage, R: BufRead, W: Write> {
    store: &'a mut HospitalManagement<S>,
    input: R,
    output: W,
}

impl<'a, S: Storage, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(store: &'a mut HospitalManagement<S>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.read_line("Enter choice: ")? else {
                break;
            };

            let flow = match choice.as_str() {
                "1" => self.add_patient()?,
                "2" => self.add_doctor()?,
                "3" => self.assign_doctor()?,
                "4" => self.search_patient()?,
                "5" => self.search_doctor()?,
                "6" => self.view_patients()?,
                "7" => self.view_doctors()?,
                "8" => self.discharge_patient()?,
                "9" => self.view_assignments()?,
                "0" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice!")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        writeln!(self.output, "Exiting. Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_nonempty(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.read_line(prompt)? {
                Some(value) if value.is_empty() => {
                    writeln!(self.output, "Input cannot be empty!")?;
                }
                other => return Ok(other),
            }
        }
    }

    fn read_age(&mut self) -> Result<Option<u32>> {
        loop {
            let Some(raw) = self.read_nonempty("Age: ")? else {
                return Ok(None);
            };
            match parse_age(&raw) {
                Ok(age) => return Ok(Some(age)),
                Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
            }
        }
    }

    fn report(&mut self, outcome: Result<()>, success: &str) -> Result<Flow> {
        match outcome {
            Ok(()) => {
                writeln!(self.output, "{}", success)?;
                if !self.store.is_synced() {
                    writeln!(self.output, "Error saving data!")?;
                }
            }
            Err(e) if e.is_lookup_failure() => {
                writeln!(self.output, "{}", e.user_friendly_message())?;
            }
            Err(e) => return Err(e),
        }
        Ok(Flow::Continue)
    }

    fn add_patient(&mut self) -> Result<Flow> {
        let Some(name) = self.read_nonempty("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.read_age()? else {
            return Ok(Flow::Exit);
        };
        let Some(patient_id) = self.read_nonempty("Patient ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(disease) = self.read_nonempty("Disease: ")? else {
            return Ok(Flow::Exit);
        };

        let outcome = self.store.add_patient(name, age, patient_id, disease);
        self.report(outcome, "Patient added.")
    }

    fn add_doctor(&mut self) -> Result<Flow> {
        let Some(name) = self.read_nonempty("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(specialization) = self.read_nonempty("Specialization: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(doctor_id) = self.read_nonempty("Doctor ID: ")? else {
            return Ok(Flow::Exit);
        };

        let outcome = self.store.add_doctor(name, specialization, doctor_id);
        self.report(outcome, "Doctor added.")
    }

    fn assign_doctor(&mut self) -> Result<Flow> {
        let Some(patient_id) = self.read_nonempty("Patient ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(doctor_id) = self.read_nonempty("Doctor ID: ")? else {
            return Ok(Flow::Exit);
        };

        let outcome = self.store.assign_doctor(&patient_id, &doctor_id);
        self.report(outcome, "Doctor assigned.")
    }

    fn discharge_patient(&mut self) -> Result<Flow> {
        let Some(patient_id) = self.read_nonempty("Patient ID: ")? else {
            return Ok(Flow::Exit);
        };

        let outcome = self.store.discharge_patient(&patient_id);
        self.report(outcome, "Patient discharged.")
    }

    fn search_patient(&mut self) -> Result<Flow> {
        let Some(patient_id) = self.read_nonempty("Patient ID: ")? else {
            return Ok(Flow::Exit);
        };

        let line = match self.store.search_patient(&patient_id) {
            Some(patient) => patient.to_string(),
            None => "Not found.".to_string(),
        };
        writeln!(self.output, "{}", line)?;
        Ok(Flow::Continue)
    }

    fn search_doctor(&mut self) -> Result<Flow> {
        let Some(doctor_id) = self.read_nonempty("Doctor ID: ")? else {
            return Ok(Flow::Exit);
        };

        let line = match self.store.search_doctor(&doctor_id) {
            Some(doctor) => doctor.to_string(),
            None => "Not found.".to_string(),
        };
        writeln!(self.output, "{}", line)?;
        Ok(Flow::Continue)
    }

    fn view_patients(&mut self) -> Result<Flow> {
        let lines = self.store.display_patients();
        self.print_listing("Patients", "No patients recorded.", &lines)
    }

    fn view_doctors(&mut self) -> Result<Flow> {
        let lines = self.store.display_doctors();
        self.print_listing("Doctors", "No doctors recorded.", &lines)
    }

    fn print_listing(&mut self, title: &str, empty: &str, lines: &[String]) -> Result<Flow> {
        if lines.is_empty() {
            writeln!(self.output, "{}", empty)?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "\n--- {} ---", title)?;
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;
        Ok(Flow::Continue)
    }

    fn view_assignments(&mut self) -> Result<Flow> {
        let assignments = self.store.list_assignments();
        if assignments.is_empty() {
            writeln!(self.output, "Assignments: None")?;
        } else {
            let listed: Vec<String> = assignments.iter().map(|a| a.to_string()).collect();
            writeln!(self.output, "Assignments: {}", listed.join(", "))?;
        }
        Ok(Flow::Continue)
    }
}
