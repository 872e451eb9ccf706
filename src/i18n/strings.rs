use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A user-facing UI string in every supported language.
#[derive(Debug, Clone, Copy)]
pub struct UiString {
    pub key: &'static str,
    pub sq: &'static str,
    pub en: &'static str,
}

impl UiString {
    pub fn get(&self, language: Language) -> &'static str {
        match language.code() {
            "sq" => self.sq,
            _ => self.en,
        }
    }
}

const fn s(key: &'static str, sq: &'static str, en: &'static str) -> UiString {
    UiString { key, sq, en }
}

/// The UI string table. Keys are dotted `section.name` identifiers; category
/// keys use the canonical (Albanian) category name as suffix.
pub const UI_STRINGS: &[UiString] = &[
    // ==================== Navigation ====================
    s("nav.home", "Ballina", "Home"),
    s("nav.collection", "Koleksioni", "Collection"),
    s("nav.about", "Rreth Nesh", "About"),
    s("nav.contact", "Kontakt", "Contact"),
    // ==================== Home ====================
    s("home.tagline", "Dizajn. Stil. Elegancë.", "Design. Style. Elegance."),
    s("home.subtagline", "Krijuar për jetesë luksoze.", "Crafted for luxury living."),
    s("home.explore", "Zbuloni Koleksionin", "Explore Collection"),
    s("home.featured", "Koleksioni i Zgjedhur", "Curated Collection"),
    s("home.philosophy", "Filozofia", "Philosophy"),
    s("home.philosophy_title", "Dizajn që flet.", "Design that speaks."),
    s(
        "home.philosophy_text",
        "Ne krijojmë hapësira që nuk janë thjesht për të jetuar, por për të ndjerë. Çdo detaj është një dialog mes formës dhe funksionit.",
        "We curate spaces not just for living, but for feeling. Every detail is a dialogue between form and function.",
    ),
    s("home.read_story", "Lexo Historinë", "Read Story"),
    s("home.view_all", "Shiko Të Gjitha", "View All"),
    s("home.view_all_collection", "Shiko Të Gjithë Koleksionin", "View All Collection"),
    s("home.no_featured", "Nuk ka produkte të zgjedhura ende.", "No featured products yet."),
    s("home.no_image", "Nuk ka imazh", "No image"),
    // ==================== Products ====================
    s("products.filter.all", "Të Gjitha", "All"),
    s("products.view_details", "Shiko Detajet", "View Details"),
    s("products.on_request", "Me Kërkesë", "On Request"),
    s("products.empty", "Nuk ka produkte në këtë kategori.", "No products in this category."),
    s("product.description", "Përshkrimi", "Description"),
    s("product.category", "Kategoria", "Category"),
    s("product.inquire", "Kërko Çmimin", "Inquire Price"),
    s("product.specifications", "Specifikat", "Specifications"),
    s("product.dimensions", "Përmasat", "Dimensions"),
    s("product.materials", "Materialet", "Materials"),
    s("product.back", "Kthehu te Koleksioni", "Back to Collection"),
    // ==================== Categories ====================
    s("category.Dhoma e Ditës", "Dhoma e Ditës", "Living Room"),
    s("category.Kuzhinat", "Kuzhinat", "Kitchens"),
    s("category.Dhomat e Gjumit", "Dhomat e Gjumit", "Bedrooms"),
    // ==================== About ====================
    s("about.title", "Trashëgimia e Delfina Home", "The Legacy of Delfina Home"),
    s(
        "about.p1",
        "Në Delfina Home, ne besojmë se mobiljet nuk janë thjesht objekte, por shpirti i shtëpisë. Çdo pjesë është zgjedhur me kujdes për të sjellë harmoni dhe luks në hapësirën tuaj.",
        "At Delfina Home, we believe furniture is not merely functionality, but the soul of a home. Each piece is meticulously curated to bring harmony and luxury into your space.",
    ),
    // ==================== Contact ====================
    s("contact.title", "Na Kontaktoni", "Get in Touch"),
    s("contact.name", "Emri Juaj", "Your Name"),
    s("contact.email", "Email Adresa", "Email Address"),
    s("contact.message", "Mesazhi", "Message"),
    s("contact.send", "Dërgo Mesazhin", "Send Message"),
    s("contact.success", "Mesazhi u dërgua me sukses!", "Message sent successfully!"),
    s(
        "contact.error",
        "Dërgimi i mesazhit dështoi. Ju lutem provoni përsëri.",
        "Failed to send message. Please try again.",
    ),
    s("contact.visit", "Na Vizitoni", "Visit Us"),
    s("contact.call", "Na Telefononi", "Call Us"),
    s("contact.write", "Na Shkruani", "Email Us"),
    s("contact.hours", "Orari", "Opening Hours"),
    s("footer.follow", "Na Ndiqni", "Follow Us"),
    // ==================== Admin ====================
    s("admin.login", "Hyrja Admin", "Admin Login"),
    s("admin.sign_in", "Hyr", "Sign In"),
    s("admin.view_site", "Shiko Faqen", "View Site"),
    s("admin.email", "Email", "Email"),
    s("admin.password", "Fjalëkalimi", "Password"),
    s("admin.products", "Produktet", "Products"),
    s("admin.messages", "Mesazhet", "Messages"),
    s("admin.add_new", "Shto Produkt", "Add Product"),
    s("admin.logout", "Dilni", "Logout"),
    s("admin.message_read", "Shfaq si të Lexuar", "Mark as Read"),
    s("admin.add_new_product", "Shto Produkt të Ri", "Add New Product"),
    s("admin.edit_product", "Ndryshoje Produktin", "Edit Product"),
    s("admin.technical_specifications", "Specifikat Teknike", "Technical Specifications"),
    s("admin.price", "Cmimi (Vetëm për Administratorë)", "Price (For Administrators Only)"),
    s("admin.image_upload", "Ngarkoni Fotot", "Upload Images"),
    s(
        "admin.multiple_files_allowed",
        "Shumë foto lejohen • SVG, PNG, JPG ose GIF",
        "Multiple files allowed • SVG, PNG, JPG or GIF",
    ),
    s("admin.product_images", "Fotot e Produktit", "Product Images"),
    s(
        "admin.first_image_as_thumbnail",
        "Fotoja e Parë do shfaqet si kryesore",
        "First Image as Thumbnail",
    ),
    s(
        "admin.drag_images_to_reorder",
        "Tërhiqi fotot për ti renditur. Fotoja e Parë do shfaqet si kryesore.",
        "Drag images to reorder. First image will be used as the main/product thumbnail",
    ),
    s("admin.featured_on_home", "Shfaqe në Ballinë", "Featured on Home"),
    s("admin.visible_on_site", "Shfaqe në Faqen e Produkteve", "Visible on Site"),
    s("admin.save_product", "Ruaj Produktin", "Save Product"),
    s("admin.saving", "Duke Ruajtur...", "Saving..."),
    s("admin.cancel", "Anulo", "Cancel"),
    s("admin.edit", "Ndrysho", "Edit"),
    s("admin.delete", "Fshij", "Delete"),
    s("admin.remove", "Hiq", "Remove"),
    s("admin.visible", "E Dukshme", "Visible"),
    s("admin.hidden", "E Fshehur", "Hidden"),
    s("admin.featured", "E Zgjedhur", "Featured"),
    s("admin.unread", "I Palexuar", "Unread"),
    s("admin.no_messages", "Nuk ka mesazhe.", "No messages."),
    s("admin.no_products", "Nuk ka produkte.", "No products."),
    s("admin.title", "Titulli", "Title"),
    s("admin.upload", "Ngarko", "Upload"),
    s(
        "admin.required_fields",
        "Ju lutem plotësoni të gjitha fushat e detyrueshme.",
        "Please fill in all required fields.",
    ),
    s(
        "admin.image_required",
        "Ju lutem shtoni të paktën një foto të produktit.",
        "Please add at least one product image.",
    ),
    s(
        "admin.save_failed",
        "Ruajtja e produktit dështoi. Ju lutem provoni përsëri.",
        "Failed to save product. Please try again.",
    ),
    s(
        "admin.delete_failed",
        "Fshirja e produktit dështoi. Ju lutem provoni përsëri.",
        "Failed to delete product. Please try again.",
    ),
    s("admin.table.image", "Foto", "Image"),
    s("admin.table.details", "Detajet", "Details"),
    s("admin.table.category", "Kategoria", "Category"),
    s("admin.table.price", "Cmimi", "Price"),
    s("admin.table.status", "Statusi", "Status"),
    s("admin.table.actions", "Veprimet", "Actions"),
];

static LOOKUP: OnceLock<HashMap<&'static str, &'static UiString>> = OnceLock::new();

fn lookup() -> &'static HashMap<&'static str, &'static UiString> {
    LOOKUP.get_or_init(|| UI_STRINGS.iter().map(|entry| (entry.key, entry)).collect())
}

/// Look up a UI string. Unknown keys fall back to the key itself.
pub fn translate<'a>(key: &'a str, language: Language) -> &'a str {
    match lookup().get(key) {
        Some(entry) => entry.get(language),
        None => key,
    }
}
