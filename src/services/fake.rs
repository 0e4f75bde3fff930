//! In-memory expense API for tests

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Mutex};

use crate::api::ExpenseApi;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseFields, ExpenseId};

/// Server stand-in that records every call
#[derive(Default)]
pub(crate) struct FakeApi {
    pub server: Mutex<Vec<Expense>>,
    pub next_id: AtomicU64,
    pub calls: Mutex<Vec<String>>,
    pub failing: AtomicBool,
    pub echo_update: AtomicBool,
    /// Signalled when a create reaches the server
    pub create_entered: Mutex<Option<mpsc::Sender<()>>>,
    /// Blocks a create until a message arrives
    pub create_release: Mutex<Option<mpsc::Receiver<()>>>,
    /// Signalled when the next update reaches the server
    pub update_entered: Mutex<Option<mpsc::Sender<()>>>,
    /// Blocks the next update until a message arrives; later updates pass
    pub update_release: Mutex<Option<mpsc::Receiver<()>>>,
}

impl FakeApi {
    pub fn with_records(records: Vec<Expense>) -> Self {
        let next = records.len() as u64 + 1;
        let api = Self::default();
        *api.server.lock().unwrap() = records;
        api.next_id.store(next, Ordering::SeqCst);
        api
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn call(&self, name: String) -> ExpenseResult<()> {
        self.calls.lock().unwrap().push(name);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ExpenseError::Status {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(())
    }
}

impl ExpenseApi for FakeApi {
    fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.call("list".into())?;
        Ok(self.server.lock().unwrap().clone())
    }

    fn create(&self, fields: &ExpenseFields) -> ExpenseResult<Expense> {
        if let Some(entered) = self.create_entered.lock().unwrap().as_ref() {
            entered.send(()).unwrap();
        }
        if let Some(release) = self.create_release.lock().unwrap().as_ref() {
            release.recv().unwrap();
        }

        self.call(format!("create {}", fields.title))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let expense = Expense::from_fields(ExpenseId::from(id), fields.clone());
        self.server.lock().unwrap().push(expense.clone());
        Ok(expense)
    }

    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> ExpenseResult<Option<Expense>> {
        let entered = self.update_entered.lock().unwrap().take();
        let release = self.update_release.lock().unwrap().take();
        if let Some(entered) = entered {
            entered.send(()).unwrap();
        }
        if let Some(release) = release {
            release.recv().unwrap();
        }

        self.call(format!("update {}", id))?;
        let updated = Expense::from_fields(id.clone(), fields.clone());
        if let Some(slot) = self.server.lock().unwrap().iter_mut().find(|e| &e.id == id) {
            *slot = updated.clone();
        }
        if self.echo_update.load(Ordering::SeqCst) {
            Ok(Some(updated))
        } else {
            Ok(None)
        }
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        self.call(format!("delete {}", id))?;
        self.server.lock().unwrap().retain(|e| &e.id != id);
        Ok(())
    }
}
