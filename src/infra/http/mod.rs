pub mod lookup_client;
