//! Financial definitions: [`Expense`]s, their [`Provider`]s, [`Category`]s
//! and [`Payment`]s.

pub mod category;
pub mod expense;
pub mod payment;
pub mod provider;

pub use self::{
    category::Category, expense::Expense, payment::Payment, provider::Provider,
};
