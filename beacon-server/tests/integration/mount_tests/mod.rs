mod test_relay_initialized_once;
mod test_standalone_serve;
