//! Resource-specific operations outside the create/get/update/delete cycle

mod prediction;
mod project;
