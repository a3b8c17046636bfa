pub mod calories;
pub mod error;
pub mod filter;
pub mod numeric;
pub mod seed;

pub use calories::{calorie_digits, extract_calories, Nutrients, CALORIES_KEY};
pub use error::{FilterError, SeedError};
pub use filter::{parse_filter, parse_required_filter, CompareOp, NumericFilter, ParsedFilter};
pub use numeric::{coerce_number, parse_number, Number};
pub use seed::{load_recipes, normalize_record, parse_recipes, NormalizedRecipe};
