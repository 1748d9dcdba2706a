pub mod check_data;
pub mod migrate;
pub mod mint_token;
pub mod serve;
