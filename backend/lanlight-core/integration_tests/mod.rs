mod client;
mod fake_device;
mod manager;
