pub mod encryption_handler;
