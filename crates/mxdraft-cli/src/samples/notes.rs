//! Notes on the UML process, illustrated with figures 9.1 to 9.10.

use mxdraft::figures::{FigurePatterns, NotesTemplate, Section};

/// Figures referenced by the notes, in section order.
pub const FIGURES: [&str; 9] = [
    "Figure 9.1",
    "Figure 9.2",
    "Figure 9.3",
    "Figure 9.4",
    "Figure 9.6",
    "Figure 9.7",
    "Figure 9.8",
    "Figure 9.9",
    "Figure 9.10",
];

/// Caption patterns tolerant to spacing and a missing dot
/// (`Figure 9.2`, `Figure9.2`, `Figure 92`).
pub fn patterns() -> FigurePatterns {
    FIGURES
        .iter()
        .map(|figure| {
            let number = figure.trim_start_matches("Figure 9.");
            (figure.to_string(), format!(r"Figure\s*9\.?{number}"))
        })
        .collect()
}

pub fn template() -> NotesTemplate {
    NotesTemplate::new("Démarche UML — Introduction pratique")
        .with_preamble([
            "_Synthèse libre inspirée du support « UML 2 » de Laurent Audibert (extraits pages 124–134)._",
            "",
            "## Pourquoi une démarche avec UML ?",
            "- UML fournit un langage pour décrire besoins et solutions, mais ne dicte pas la démarche.\n\
             - Une méthode outillée par UML est typiquement:\n  \
             - pilotée par les cas d’utilisation (utilité pour l’utilisateur en premier),\n  \
             - centrée sur l’architecture (satisfaction des besoins, évolutivité, contraintes),\n  \
             - pragmatique (se concentrer sur le sous-ensemble UML réellement utile).",
            "",
        ])
        .with_section(Section::new(
            "Figure 9.1",
            "De l’expression des besoins au code",
            "UML est un langage de modélisation, pas une méthode. Une démarche outillée par UML doit être \
             pilotée par les cas d’utilisation et centrée sur l’architecture, tout en restant légère. \
             L’objectif: produire un logiciel utile, de qualité, dans des délais et coûts maîtrisés.",
        ))
        .with_section(Section::new(
            "Figure 9.2",
            "Identification des besoins — Diagrammes de cas d’utilisation",
            "On délimite le système, on identifie acteurs et cas d’utilisation, puis on priorise selon importance et risque. \
             Les cas d’utilisation décrivent les besoins des utilisateurs sans considération technique.",
        ))
        .with_section(Section::new(
            "Figure 9.3",
            "Diagrammes de séquence système",
            "Ils illustrent la description textuelle des cas d’utilisation en montrant les échanges entre acteurs et le système (vu comme une boîte noire). \
             On modélise au minimum le scénario nominal et, si nécessaire, les variantes majeures.",
        ))
        .with_section(Section::new(
            "Figure 9.4",
            "Maquette de l’IHM",
            "Une maquette rapide et jetable facilite le dialogue avec les utilisateurs. \
             Elle peut évoluer pour simuler navigation et enchaînements d’écrans, même si les fonctions sont fictives.",
        ))
        .with_section(Section::new(
            "Figure 9.6",
            "Diagramme de classes participantes",
            "Pont entre besoins et conception. Il distingue Dialogues (IHM), Contrôles (logique d’application) et Entités (domaine), \
             et organise leurs relations pour préserver l’indépendance du domaine vis-à-vis de l’interface.",
        ))
        .with_section(Section::new(
            "Figure 9.7",
            "Diagrammes d’activités de navigation",
            "Ils représentent la navigation IHM (fenêtres, menus, dialogues…). \
             La modélisation est souvent structurée par acteur et reliée aux classes de dialogue.",
        ))
        .with_section(Section::new(
            "Figure 9.8",
            "Diagrammes d’interaction (conception)",
            "On alloue précisément les responsabilités aux classes d’analyse via des séquences/communications. \
             Ces diagrammes matérialisent qui fait quoi dans un scénario et préparent la conception détaillée.",
        ))
        .with_section(Section::new(
            "Figure 9.9",
            "De la boîte noire aux objets en collaboration",
            "Le ‘système’ des séquences système est remplacé par un ensemble d’objets (Dialogues, Contrôles, Entités) qui collaborent. \
             Les interactions doivent respecter les associations et leur navigabilité.",
        ))
        .with_section(Section::new(
            "Figure 9.10",
            "Diagramme de classes de conception",
            "Vue statique destinée à l’implémentation: on complète opérations, visibilités et détails internes des classes. \
             La première ébauche se raffine en parallèle des diagrammes d’interaction, indépendamment des choix techniques.",
        ))
        .with_closing([
            "## Chaîne d’ensemble (récapitulatif)",
            "1) Cas d’utilisation → 2) Séquences système → 3) Maquette IHM → 4) Modèle du domaine → \
             5) Classes participantes (Dialogues/Contrôles/Entités) → 6) Interactions (séquences) → \
             7) Classes de conception (prêtes pour l’implémentation).",
            "",
            "## Conseils pratiques",
            "- Modélisez juste ce qu’il faut: privilégiez la clarté et la traçabilité des décisions.\n\
             - Tissez les liens entre artefacts (un cas d’utilisation doit se retrouver en séquences, puis en classes participantes, etc.).\n\
             - Impliquez les utilisateurs tôt via la maquette et itérez selon importance/risque.",
            "",
        ])
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mxdraft::figures::FigureImages;

    use super::*;

    #[test]
    fn test_patterns() {
        let patterns = patterns();
        assert_eq!(patterns.len(), 9);
        assert_eq!(patterns["Figure 9.1"], r"Figure\s*9\.?1");
        assert_eq!(patterns["Figure 9.10"], r"Figure\s*9\.?10");
    }

    #[test]
    fn test_sections_follow_figures() {
        let template = template();
        let figures: Vec<&str> = template.sections().iter().map(Section::figure).collect();
        assert_eq!(figures, FIGURES);
    }

    #[test]
    fn test_nested_list_indentation() {
        let text = template().render(&FigureImages::new());
        assert!(text.contains(
            "- Une méthode outillée par UML est typiquement:\n  - pilotée par les cas d’utilisation"
        ));
    }

    #[test]
    fn test_render_skeleton() {
        let text = template().render(&FigureImages::new());

        assert!(text.starts_with("# Démarche UML — Introduction pratique\n\n_Synthèse libre"));
        assert_eq!(text.matches("(non extraite).").count(), 9);
        assert!(text.ends_with("itérez selon importance/risque.\n"));
    }

    #[test]
    fn test_render_with_image() {
        let mut images = FigureImages::new();
        images.insert(
            "Figure 9.10".to_string(),
            Some(PathBuf::from("figures/figure_9_10.png")),
        );

        let text = template().render(&images);
        assert!(text.contains("## Diagramme de classes de conception\n![Figure 9.10](figures/figure_9_10.png)\n"));
        assert_eq!(text.matches("(non extraite).").count(), 8);
    }
}
