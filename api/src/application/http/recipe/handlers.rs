pub mod request_recipe;
