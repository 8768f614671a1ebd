pub mod a030_gallery;
