mod assignment;
mod ingredient;
mod mealplan;
mod nutrition;
mod recipe;
mod slot;

pub use assignment::*;
pub use ingredient::*;
pub use mealplan::*;
pub use nutrition::*;
pub use recipe::*;
pub use slot::*;
