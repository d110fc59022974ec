fn main() {
    pages_gallery::run();
}
