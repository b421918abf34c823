// file: src/tools.rs
// version: 1.0.0
// guid: 2be32819-0368-47ac-aeee-44c877e63fa1

//! Catalog of known GROMACS tools

use serde::Serialize;

/// One entry in the tool catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub summary: &'static str,
}

const fn tool(name: &'static str, summary: &'static str) -> ToolSpec {
    ToolSpec { name, summary }
}

/// GROMACS 4.x command-line tools
pub const CATALOG: &[ToolSpec] = &[
    tool("do_dssp", "assigns secondary structure and calculates solvent accessible surface area"),
    tool("editconf", "edits the box and writes subgroups"),
    tool("eneconv", "converts energy files"),
    tool("g_anaeig", "analyzes the eigenvectors"),
    tool("g_analyze", "analyzes data sets"),
    tool("g_angle", "calculates distributions and correlations for angles and dihedrals"),
    tool("g_bond", "calculates bond length distributions"),
    tool("g_bundle", "analyzes bundles of axes, e.g. helix axes"),
    tool("g_chi", "calculates everything you want to know about chi and other dihedrals"),
    tool("g_cluster", "clusters structures"),
    tool("g_clustsize", "calculate size distributions of atomic clusters"),
    tool("g_confrms", "fits two structures and calculates the rmsd"),
    tool("g_covar", "calculates and diagonalizes the covariance matrix"),
    tool("g_current", "calculates dielectric constants for charged systems"),
    tool("g_density", "calculates the density of the system"),
    tool("g_densmap", "calculates 2D number-density maps"),
    tool("g_dielectric", "calculates frequency dependent dielectric constants"),
    tool("g_dih", "analyzes dihedral transitions"),
    tool("g_dipoles", "computes the total dipole plus fluctuations"),
    tool("g_disre", "analyzes distance restraints"),
    tool("g_dist", "calculates the distances between the centers of mass of two groups"),
    tool("g_dyndom", "interpolates and extrapolates structure rotations"),
    tool("g_enemat", "extracts an energy matrix from an energy file"),
    tool("g_energy", "writes energies to xvg files and displays averages"),
    tool("g_filter", "frequency filters trajectories, useful for making smooth movies"),
    tool("g_gyrate", "calculates the radius of gyration"),
    tool("g_h2order", "computes the orientation of water molecules"),
    tool("g_hbond", "computes and analyzes hydrogen bonds"),
    tool("g_helix", "calculates basic properties of alpha helices"),
    tool("g_helixorient", "calculates local pitch/bending/rotation/orientation inside helices"),
    tool("g_kinetics", "analyzes kinetic constants from properties based on the Eyring model"),
    tool("g_lie", "free energy estimate from linear combinations"),
    tool("g_mdmat", "calculates residue contact maps"),
    tool("g_mindist", "calculates the minimum distance between two groups"),
    tool("g_morph", "interpolates linearly between conformations"),
    tool("g_msd", "calculates mean square displacements"),
    tool("g_nmeig", "diagonalizes the Hessian"),
    tool("g_nmens", "generates an ensemble of structures from the normal modes"),
    tool("g_nmtraj", "generates a virtual trajectory from an eigenvector"),
    tool("g_order", "computes the order parameter per atom for carbon tails"),
    tool("g_polystat", "calculates static properties of polymers"),
    tool("g_potential", "calculates the electrostatic potential across the box"),
    tool("g_principal", "calculates axes of inertia for a group of atoms"),
    tool("g_rama", "computes Ramachandran plots"),
    tool("g_rdf", "calculates radial distribution functions"),
    tool("g_rms", "calculates rmsd's with a reference structure and rmsd matrices"),
    tool("g_rmsdist", "calculates atom pair distances averaged with power -2, -3 or -6"),
    tool("g_rmsf", "calculates atomic fluctuations"),
    tool("g_rotacf", "calculates the rotational correlation function for molecules"),
    tool("g_saltbr", "computes salt bridges"),
    tool("g_sas", "computes solvent accessible surface area"),
    tool("g_sdf", "calculates solvent spatial distribution functions"),
    tool("g_sgangle", "computes the angle and distance between two groups"),
    tool("g_sham", "read/write xmgr and xvgr data sets"),
    tool("g_sorient", "analyzes solvent orientation around solutes"),
    tool("g_spatial", "calculates the spatial distribution function"),
    tool("g_spol", "analyzes solvent dipole orientation and polarization around solutes"),
    tool("g_tcaf", "calculates viscosities of liquids"),
    tool("g_traj", "plots x, v and f of selected atoms/groups (and more) from a trajectory"),
    tool("g_vanhove", "calculates Van Hove displacement functions"),
    tool("g_velacc", "calculates velocity autocorrelation functions"),
    tool("g_wham", "weighted histogram analysis after umbrella sampling"),
    tool("genbox", "solvates a system"),
    tool("genconf", "multiplies a conformation in 'random' orientations"),
    tool("genion", "generates mono atomic ions on energetically favorable positions"),
    tool("genrestr", "generates position restraints or distance restraints for index groups"),
    tool("gmxcheck", "checks and compares files"),
    tool("gmxdump", "makes binary files human readable"),
    tool("grompp", "makes a run input file"),
    tool("make_edi", "generate input files for essential dynamics sampling"),
    tool("make_ndx", "makes index files"),
    tool("mdrun", "performs a simulation, do a normal mode analysis or an energy minimization"),
    tool("mk_angndx", "generates index files for g_angle"),
    tool("pdb2gmx", "converts pdb files to topology and coordinate files"),
    tool("protonate", "protonates structures"),
    tool("tpbconv", "makes a run input file for restarting a crashed run"),
    tool("trjcat", "concatenates trajectory files"),
    tool("trjconv", "converts and manipulates trajectory files"),
    tool("trjorder", "orders molecules according to their distance to a group"),
    tool("xpm2ps", "converts XPM matrices to encapsulated postscript (or XPM)"),
];

/// Names of all catalog tools, in catalog order
pub fn catalog_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|spec| spec.name)
}

/// Look up a catalog entry by name
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let names: HashSet<_> = catalog_names().collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_catalog_contains_core_tools() {
        for name in ["grompp", "mdrun", "make_ndx", "trjconv", "g_dist"] {
            assert!(find(name).is_some(), "{} missing from catalog", name);
        }
        assert!(find("g_nonexistent").is_none());
    }
}
