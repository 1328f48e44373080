use chemsim::core::models::element::Element;
use chemsim::core::models::molecule::templates;
use std::fmt::Write;

pub fn list_elements() {
    print!("{}", element_table());
}

pub fn list_molecules() {
    print!("{}", molecule_table());
}

fn element_table() -> String {
    let mut out = format!(
        "{:<4} {:<10} {:>8} {:>6} {:>5} {:>7} {:>8} {:>8}  {}\n",
        "Sym", "Name", "Mass", "Radius", "EN", "Valence", "Melt", "Boil", "Shells"
    );
    for element in Element::ALL {
        let p = element.properties();
        let shells: Vec<String> = p
            .orbitals
            .iter()
            .map(|o| format!("{}:{}", o.shell, o.electrons))
            .collect();
        let _ = writeln!(
            out,
            "{:<4} {:<10} {:>8.3} {:>6.2} {:>5.2} {:>7} {:>8.0} {:>8.0}  {}",
            p.symbol,
            p.name,
            p.mass,
            p.radius,
            p.electronegativity,
            p.valence,
            p.melting_point,
            p.boiling_point,
            shells.join(" ")
        );
    }
    out
}

fn molecule_table() -> String {
    let mut out = format!("{:<8} {:<20} {:>5} {:>5}\n", "Formula", "Name", "Atoms", "Bonds");
    for template in templates() {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:>5} {:>5}",
            template.formula,
            template.name,
            template.atoms.len(),
            template.bonds.len()
        );
    }
    out
}
