//! Dokumentlagring: samlingar av JSON-dokument nycklade på id

use anyhow::Result;
use serde_json::Value;
use std::fmt;

/// Namngiven samling i dokumentlagret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Settings,
    Classes,
    Students,
    Extras,
}

impl Collection {
    pub const ALL: &'static [Self] = &[Self::Settings, Self::Classes, Self::Students, Self::Extras];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Classes => "classes",
            Self::Students => "students",
            Self::Extras => "extras",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nyckel-värde-lager för hela dokument.
///
/// `put` skriver över hela dokumentet; ingen fältvis sammanslagning.
/// `put_batch` är atomisk: antingen skrivs alla dokument eller inget.
pub trait DocumentStore {
    fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Alla dokument i samlingen, sorterade på id
    fn get_all(&self, collection: Collection) -> Result<Vec<(String, Value)>>;

    fn put(&self, collection: Collection, id: &str, document: &Value) -> Result<()>;

    fn put_batch(&self, collection: Collection, documents: &[(String, Value)]) -> Result<()>;

    fn delete(&self, collection: Collection, id: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Lager för tester av fel- och skrivbeteende

    use super::*;
    use anyhow::bail;
    use std::cell::RefCell;

    /// Lager där varje anrop misslyckas, som ett nätverk som är nere
    pub struct UnavailableStore;

    impl DocumentStore for UnavailableStore {
        fn get(&self, _: Collection, _: &str) -> Result<Option<Value>> {
            bail!("lagret är inte tillgängligt")
        }

        fn get_all(&self, _: Collection) -> Result<Vec<(String, Value)>> {
            bail!("lagret är inte tillgängligt")
        }

        fn put(&self, _: Collection, _: &str, _: &Value) -> Result<()> {
            bail!("lagret är inte tillgängligt")
        }

        fn put_batch(&self, _: Collection, _: &[(String, Value)]) -> Result<()> {
            bail!("lagret är inte tillgängligt")
        }

        fn delete(&self, _: Collection, _: &str) -> Result<()> {
            bail!("lagret är inte tillgängligt")
        }
    }

    /// Skrivanrop som registrerats av [`RecordingStore`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum StoreWrite {
        Put(Collection, String),
        Batch(Collection, Vec<String>),
        Delete(Collection, String),
    }

    /// Minneslager som loggar varje skrivning
    #[derive(Default)]
    pub struct RecordingStore {
        docs: RefCell<std::collections::BTreeMap<(&'static str, String), Value>>,
        pub writes: RefCell<Vec<StoreWrite>>,
    }

    impl RecordingStore {
        pub fn take_writes(&self) -> Vec<StoreWrite> {
            self.writes.borrow_mut().drain(..).collect()
        }
    }

    impl DocumentStore for RecordingStore {
        fn get(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
            Ok(self.docs.borrow().get(&(collection.as_str(), id.to_string())).cloned())
        }

        fn get_all(&self, collection: Collection) -> Result<Vec<(String, Value)>> {
            Ok(self
                .docs
                .borrow()
                .iter()
                .filter(|((c, _), _)| *c == collection.as_str())
                .map(|((_, id), v)| (id.clone(), v.clone()))
                .collect())
        }

        fn put(&self, collection: Collection, id: &str, document: &Value) -> Result<()> {
            self.docs
                .borrow_mut()
                .insert((collection.as_str(), id.to_string()), document.clone());
            self.writes.borrow_mut().push(StoreWrite::Put(collection, id.to_string()));
            Ok(())
        }

        fn put_batch(&self, collection: Collection, documents: &[(String, Value)]) -> Result<()> {
            let mut docs = self.docs.borrow_mut();
            for (id, document) in documents {
                docs.insert((collection.as_str(), id.clone()), document.clone());
            }
            self.writes.borrow_mut().push(StoreWrite::Batch(
                collection,
                documents.iter().map(|(id, _)| id.clone()).collect(),
            ));
            Ok(())
        }

        fn delete(&self, collection: Collection, id: &str) -> Result<()> {
            self.docs.borrow_mut().remove(&(collection.as_str(), id.to_string()));
            self.writes.borrow_mut().push(StoreWrite::Delete(collection, id.to_string()));
            Ok(())
        }
    }
}
