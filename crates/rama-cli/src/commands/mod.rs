pub mod angles;
pub mod batch;
pub mod density;
pub mod fetch;
pub mod outliers;
pub mod secondary;
