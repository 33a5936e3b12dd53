pub mod use_balance;
