pub mod date_utils;
pub mod db_utils;
