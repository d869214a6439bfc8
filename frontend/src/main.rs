fn main() {
    folio_admin_frontend::boot();
}
