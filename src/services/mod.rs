pub mod assistant;
pub mod completion;
pub mod email;
pub mod lookup;
pub mod mongo_store;
pub mod prompt;
