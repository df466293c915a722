mod html_render_tests;
mod text_tests;
