mod api_tests;
mod property_tests;
