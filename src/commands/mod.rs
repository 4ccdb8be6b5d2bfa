pub mod migrate;
pub mod run;
pub mod seed;

pub use migrate::handle_migrate;
pub use run::handle_run;
pub use seed::handle_seed;
