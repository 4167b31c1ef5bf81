pub mod descriptor_tests;
pub mod registry_tests;
