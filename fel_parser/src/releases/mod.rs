//! The immutable release database: known builds per release family

mod database;

pub use database::{
    global, Arch, DatabaseError, InstallMethod, Os, ReleaseDatabase, ReleaseEntry, ReleaseFamily,
    Vendor,
};
