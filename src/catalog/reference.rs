//! Built-in activity catalogue shipped with the app

use once_cell::sync::Lazy;

use crate::domain::{ActivityType, CatalogItem};

static REFERENCE_CATALOG: Lazy<Vec<CatalogItem>> = Lazy::new(|| {
    vec![
        // Centre
        centre(
            "c1",
            "Peinture de Galets",
            "Une activité créative de peinture sur de petits galets.",
            "https://images.unsplash.com/photo-1513364776144-60967b0f800f?w=400&q=80",
            "45 min",
            "Salle d'arts",
            "Activités",
            "5 ans",
        ),
        centre(
            "c2",
            "Chasse au Trésor",
            "Grande chasse au trésor dans la cour et le jardin du centre.",
            "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?w=400&q=80",
            "60 min",
            "Jardin extérieur",
            "Jeux",
            "7/8 ans",
        ),
        centre(
            "c3",
            "Coloriage Magique",
            "Coloriage magique avec des chiffres pour révéler le dessin caché.",
            "https://images.unsplash.com/photo-1549488344-1f9b8d2bd1f3?w=400&q=80",
            "30 min",
            "Salle de repos",
            "Coloriage",
            "3 ans",
        ),
        // Periscolaire
        periscolaire(
            "p1",
            "Légo Éducatif",
            "Construction de structures avec des modèles liés au cours de géométrie.",
            "https://images.unsplash.com/photo-1585366119957-e9730b6d0f60?w=400&q=80",
            "40 min",
            "Classe de CP",
            "Activités",
            ("primaire", "CP"),
        ),
        periscolaire(
            "p2",
            "Jeu de Rôle: Les Marchands",
            "Apprendre à compter en jouant à la marchande.",
            "https://images.unsplash.com/photo-1563207153-f404bf782c5f?w=400&q=80",
            "50 min",
            "Salle commune",
            "Jeux",
            ("maternelle", "Grande section"),
        ),
        periscolaire(
            "p3",
            "Coloriage d'Automne",
            "Feuilles d'automne et arbres à colorier avec des couleurs chaudes.",
            "https://images.unsplash.com/photo-1598257006458-087169a1f08d?w=400&q=80",
            "20 min",
            "Classe Maternelle",
            "Coloriage",
            ("maternelle", "Moyenne section"),
        ),
    ]
});

/// The static reference catalogue
pub fn reference_catalog() -> &'static [CatalogItem] {
    &REFERENCE_CATALOG
}

#[allow(clippy::too_many_arguments)]
fn centre(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    duration: &str,
    location: &str,
    category: &str,
    age_group: &str,
) -> CatalogItem {
    let mut item = CatalogItem::new(id, title, category, ActivityType::Centre);
    item.description = description.to_string();
    item.image = image.to_string();
    item.duration = Some(duration.to_string());
    item.location = Some(location.to_string());
    item.age_group = Some(age_group.to_string());
    item
}

#[allow(clippy::too_many_arguments)]
fn periscolaire(
    id: &str,
    title: &str,
    description: &str,
    image: &str,
    duration: &str,
    location: &str,
    category: &str,
    (school_level, school_class): (&str, &str),
) -> CatalogItem {
    let mut item = CatalogItem::new(id, title, category, ActivityType::Periscolaire);
    item.description = description.to_string();
    item.image = image.to_string();
    item.duration = Some(duration.to_string());
    item.location = Some(location.to_string());
    item.school_level = Some(school_level.to_string());
    item.school_class = Some(school_class.to_string());
    item
}
