fn main() {
    allhalal_web::start();
}
