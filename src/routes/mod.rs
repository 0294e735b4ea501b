pub mod accounts;
pub mod boards;
pub mod health;
pub mod validation;

pub use accounts::{register_account, verify_account};
pub use boards::{add_board, list_boards, purge_boards, update_board};
pub use health::health_check;
pub use validation::{validate_board_name, validate_credentials};
