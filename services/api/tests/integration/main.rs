mod http_test;
mod ingredient_test;
mod recipe_test;
mod relation_test;
mod shopping_list_test;
