pub mod fee_action_reader;
pub mod fee_writer;
