pub mod learn_card;
pub mod menu;
pub mod option_grid;
pub mod result_panel;
pub mod unit_list;
